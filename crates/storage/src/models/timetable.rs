use serde::{Deserialize, Serialize};

use super::athlete::AthleteKey;

/// The copy of an athlete's identity that the time table denormalizes into
/// its orderings. One athlete can appear in up to four orderings of the same
/// record at once, which is why renames have to walk all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteRef {
    pub name: String,
    pub surname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
}

impl AthleteRef {
    pub fn matches(&self, key: &AthleteKey) -> bool {
        self.name == key.name && self.surname == key.surname
    }

    /// Rewrites the identity, leaving the cached age group untouched.
    pub fn rename_to(&mut self, key: &AthleteKey) {
        self.name = key.name.clone();
        self.surname = key.surname.clone();
    }
}

/// One heat of a track discipline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub name: String,
    pub athletes: Vec<AthleteRef>,
}

/// How athletes start in a discipline: in heats, in a flat sequence, or in
/// no particular order at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StartingOrder {
    Track(Vec<Run>),
    Default(Vec<AthleteRef>),
    NoOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisciplineState {
    BeforeStart,
    Active,
    Finished,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discipline {
    pub name: String,
    pub state: DisciplineState,
    pub starting_order: StartingOrder,
}

/// Per-group schedule record: the default athlete sequence, the default heat
/// assignment, and the per-discipline starting orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeGroup {
    pub name: String,
    pub default_athlete_order: Vec<AthleteRef>,
    pub default_run_order: Vec<Run>,
    pub disciplines: Vec<Discipline>,
}
