use std::collections::HashMap;

use chrono::serde::ts_seconds_option;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::achievement::Achievement;
use super::group::CompetitionType;

/// One registered athlete with all their discipline results.
///
/// Identity is the (name, surname) pair; the store key is derived from it
/// (see [`AthleteKey::composite`]), so renaming an athlete replaces the
/// record rather than updating it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Athlete {
    pub name: String,
    pub surname: String,
    #[serde(default, with = "ts_seconds_option", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<DateTime<Utc>>,
    pub gender: String,
    #[serde(default)]
    pub achievements: HashMap<String, Achievement>,
    pub competition_type: CompetitionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_number: Option<u16>,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_shirt: Option<String>,
}

impl Athlete {
    pub fn key(&self) -> AthleteKey {
        AthleteKey::new(&self.name, &self.surname)
    }

    /// Age class for result lists: the uppercased gender plus a decade
    /// suffix for decathlon athletes (40/50/60), or the U-bracket for
    /// youth competitions. Athletes without a birth date stay in the open
    /// class.
    pub fn age_class(&self) -> String {
        let mut class = self.gender.to_uppercase();

        let Some(birth_date) = self.birth_date else {
            return class;
        };
        let years = Utc::now().years_since(birth_date).unwrap_or(0);

        match self.competition_type {
            CompetitionType::Decathlon => match years {
                age if age < 40 => {}
                age if age < 50 => class += "40",
                age if age < 60 => class += "50",
                _ => class += "60",
            },
            _ => match years {
                age if age < 4 => class += "-U4",
                age if age < 6 => class += "-U6",
                age if age < 8 => class += "-U8",
                age if age < 10 => class += "-U10",
                age if age < 12 => class += "-U12",
                age if age < 14 => class += "-U14",
                age if age < 16 => class += "-U16",
                _ => {}
            },
        }

        class
    }
}

/// The (name, surname) identity an athlete is keyed and referenced by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AthleteKey {
    pub name: String,
    pub surname: String,
}

impl AthleteKey {
    pub fn new(name: &str, surname: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            surname: surname.trim().to_string(),
        }
    }

    /// The store key: `"{name}_{surname}"`.
    pub fn composite(&self) -> String {
        format!("{}_{}", self.name, self.surname)
    }
}
