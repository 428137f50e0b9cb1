//! Scans the athlete and group tables and denormalizes them into flat
//! per-athlete rows: group placement plus a field -> raw cell value map,
//! with the nested achievement records flattened to their discipline key.

use std::collections::{BTreeMap, HashMap};

use storage::models::Athlete;
use storage::store::{AthleteStore, GroupStore};
use tracing::warn;

use crate::error::Result;
use crate::normalize::RawValue;
use crate::sheet::layout::GroupClass;

/// One flattened athlete row, positioned within its group.
#[derive(Debug, Clone)]
pub struct SheetRow {
    pub group_name: String,
    pub ordinal: u32,
    pub fields: BTreeMap<String, RawValue>,
}

/// Joins every group roster against the athlete table. Roster entries
/// without an athlete record are logged and skipped; athletes without a
/// group membership do not appear at all.
pub async fn read_sheet_rows(
    athletes: &dyn AthleteStore,
    groups: &dyn GroupStore,
) -> Result<Vec<SheetRow>> {
    let athletes = athletes.scan().await?;
    let by_key: HashMap<String, &Athlete> = athletes
        .iter()
        .map(|athlete| (athlete.key().composite(), athlete))
        .collect();

    let mut rows = Vec::new();
    for group in groups.scan().await? {
        let mut members: Vec<&Athlete> = Vec::new();
        for key in &group.athlete_ids {
            match by_key.get(&key.composite()) {
                Some(athlete) => members.push(athlete),
                None => warn!(
                    "athlete {} listed in group '{}' has no record, skipping",
                    key.composite(),
                    group.name
                ),
            }
        }

        // Kids tracks get their rows assigned gender-first; the sort is
        // stable, so roster order survives within each gender.
        if GroupClass::classify(&group.name).is_some_and(|c| c.sorts_by_gender()) {
            members.sort_by(|a, b| a.gender.cmp(&b.gender));
        }

        for (ordinal, athlete) in members.iter().enumerate() {
            rows.push(flatten(&group.name, ordinal as u32, athlete));
        }
    }

    Ok(rows)
}

fn flatten(group_name: &str, ordinal: u32, athlete: &Athlete) -> SheetRow {
    let mut fields = BTreeMap::new();

    fields.insert("name".to_string(), RawValue::text(&athlete.name));
    fields.insert("surname".to_string(), RawValue::text(&athlete.surname));
    fields.insert("gender".to_string(), RawValue::text(&athlete.gender));
    fields.insert(
        "birth_date".to_string(),
        match athlete.birth_date {
            Some(date) => RawValue::text(date.timestamp().to_string()),
            None => RawValue::Missing,
        },
    );
    fields.insert(
        "starting_number".to_string(),
        match athlete.starting_number {
            Some(number) => RawValue::Number(f64::from(number)),
            None => RawValue::Missing,
        },
    );

    for achievement in athlete.achievements.values() {
        fields.insert(
            achievement.name().to_string(),
            RawValue::Text(achievement.cell_value()),
        );
    }

    SheetRow {
        group_name: group_name.to_string(),
        ordinal,
        fields,
    }
}
