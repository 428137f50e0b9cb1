//! Rewrites an athlete's identity across every table that denormalizes it.
//!
//! The store enforces no referential integrity: the athlete record is keyed
//! by the name-derived composite key, and the group rosters and time-table
//! orderings each carry their own copy of the identity. The writes here are
//! not transactional either; a failure partway leaves the tables split
//! between old and new identity until the rename is re-run.

use storage::models::{AthleteKey, Run, StartingOrder};
use storage::store::{AthleteStore, GroupStore, TimeTableStore};
use tracing::{info, warn};

use crate::error::Result;

/// Whether a table scan keeps going after its first hit. `FirstMatch` is
/// the historical behavior; whether an athlete can legitimately sit in more
/// than one group was never settled, so both policies stay available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    FirstMatch,
    AllMatches,
}

/// What the rename actually touched, per table.
#[derive(Debug, Default, PartialEq)]
pub struct RenameOutcome {
    pub athlete_found: bool,
    pub groups_touched: Vec<String>,
    pub time_groups_touched: Vec<String>,
}

pub struct RenamePropagator<'a> {
    athletes: &'a dyn AthleteStore,
    groups: &'a dyn GroupStore,
    time_tables: &'a dyn TimeTableStore,
    mode: MatchMode,
}

impl<'a> RenamePropagator<'a> {
    pub fn new(
        athletes: &'a dyn AthleteStore,
        groups: &'a dyn GroupStore,
        time_tables: &'a dyn TimeTableStore,
        mode: MatchMode,
    ) -> Self {
        Self {
            athletes,
            groups,
            time_tables,
            mode,
        }
    }

    /// Runs the rename against all three tables. Absence in any table is
    /// logged and skipped, never fatal.
    pub async fn rename(&self, old: &AthleteKey, new: &AthleteKey) -> Result<RenameOutcome> {
        Ok(RenameOutcome {
            athlete_found: self.rename_athlete(old, new).await?,
            groups_touched: self.rename_in_groups(old, new).await?,
            time_groups_touched: self.rename_in_time_tables(old, new).await?,
        })
    }

    /// The record key is derived from the name fields, so the rename is a
    /// delete of the old key plus an insert under the new one.
    async fn rename_athlete(&self, old: &AthleteKey, new: &AthleteKey) -> Result<bool> {
        let Some(mut athlete) = self.athletes.get(old).await? else {
            warn!("athlete {} not found in athlete_store", old.composite());
            return Ok(false);
        };

        athlete.name = new.name.clone();
        athlete.surname = new.surname.clone();

        self.athletes.delete(old).await?;
        self.athletes.put(athlete).await?;
        info!("athlete renamed in athlete_store: {} -> {}", old.composite(), new.composite());
        Ok(true)
    }

    async fn rename_in_groups(&self, old: &AthleteKey, new: &AthleteKey) -> Result<Vec<String>> {
        let mut touched = Vec::new();

        for mut group in self.groups.scan().await? {
            let Some(position) = group.athlete_ids.iter().position(|key| key == old) else {
                continue;
            };

            info!("athlete found in group '{}' at position {position}", group.name);
            group.athlete_ids[position] = new.clone();
            let name = group.name.clone();
            self.groups.put(group).await?;
            touched.push(name);

            if self.mode == MatchMode::FirstMatch {
                break;
            }
        }

        if touched.is_empty() {
            warn!("athlete {} not found in any group", old.composite());
        }
        Ok(touched)
    }

    /// Walks every ordering of a time-table record independently: the
    /// default athlete order, the default run order, and each discipline's
    /// starting order. Disciplines the athlete does not appear in are kept
    /// as they are; a record where nothing matched is not written back.
    async fn rename_in_time_tables(
        &self,
        old: &AthleteKey,
        new: &AthleteKey,
    ) -> Result<Vec<String>> {
        let mut touched = Vec::new();

        for mut time_group in self.time_tables.scan().await? {
            let mut changed = false;

            match time_group
                .default_athlete_order
                .iter_mut()
                .find(|athlete| athlete.matches(old))
            {
                Some(athlete) => {
                    athlete.rename_to(new);
                    changed = true;
                }
                None => info!(
                    "athlete not in default_athlete_order of '{}'",
                    time_group.name
                ),
            }

            if rename_in_runs(&mut time_group.default_run_order, old, new) {
                changed = true;
            } else {
                info!("athlete not in default_run_order of '{}'", time_group.name);
            }

            for discipline in &mut time_group.disciplines {
                match &mut discipline.starting_order {
                    StartingOrder::Track(runs) => {
                        if rename_in_runs(runs, old, new) {
                            changed = true;
                        }
                    }
                    StartingOrder::Default(order) => {
                        if let Some(athlete) =
                            order.iter_mut().find(|athlete| athlete.matches(old))
                        {
                            athlete.rename_to(new);
                            changed = true;
                        }
                    }
                    StartingOrder::NoOrder => {}
                }
            }

            if changed {
                let name = time_group.name.clone();
                self.time_tables.put(time_group).await?;
                touched.push(name);
            } else {
                info!("no updates needed for time group '{}'", time_group.name);
            }

            // The historical pass only ever looked at the first record the
            // scan returned.
            if self.mode == MatchMode::FirstMatch {
                break;
            }
        }

        Ok(touched)
    }
}

/// Rewrites the first occurrence of the identity across a list of runs.
fn rename_in_runs(runs: &mut [Run], old: &AthleteKey, new: &AthleteKey) -> bool {
    for run in runs {
        if let Some(athlete) = run.athletes.iter_mut().find(|athlete| athlete.matches(old)) {
            athlete.rename_to(new);
            return true;
        }
    }
    false
}
