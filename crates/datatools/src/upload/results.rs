//! Uploads historical decathlon results: each row of the old address-sheet
//! export carries the athlete's master data plus one short-labelled column
//! per discipline, which get normalized into typed achievements on the way
//! in.

use std::collections::HashMap;
use std::path::Path;

use storage::models::{AthleteKey, CompetitionType};
use tracing::warn;

use super::client::ApiClient;
use super::models::AthleteUpload;
use super::register::{clean_name, parse_birthday, registration_gender};
use crate::error::Result;
use crate::normalize::{self, DisciplineKind, RawValue};

/// Short column label, discipline name, and result shape for each of the
/// ten disciplines. The 1500m is absent here because it spans two columns.
const DISCIPLINES: &[(&str, &str, DisciplineKind)] = &[
    ("100m", "100 Meter Lauf", DisciplineKind::Time),
    ("Weit", "Weitsprung", DisciplineKind::Distance),
    ("Kugel", "Kugelstoß", DisciplineKind::Distance),
    ("Hoch", "Hochsprung", DisciplineKind::Height),
    ("400 m", "400 Meter Lauf", DisciplineKind::Time),
    ("Hürden", "110 Meter Hürden", DisciplineKind::Time),
    ("Diskus", "Diskuswurf", DisciplineKind::Distance),
    ("Stab", "Stabhochsprung", DisciplineKind::Height),
    ("Speer", "Speerwurf", DisciplineKind::Distance),
];

/// One row of the old results export, keyed by column header.
#[derive(Debug, Clone)]
pub struct ResultsRow {
    columns: HashMap<String, String>,
}

impl ResultsRow {
    pub fn new(columns: HashMap<String, String>) -> Self {
        Self { columns }
    }

    fn raw(&self, label: &str) -> RawValue {
        match self.columns.get(label).map(|v| v.trim()) {
            None | Some("") => RawValue::Missing,
            Some(value) => RawValue::text(value),
        }
    }

    fn text(&self, label: &str) -> &str {
        self.columns.get(label).map(String::as_str).unwrap_or("")
    }

    /// Normalizes every discipline column of the row, the split-column
    /// 1500m included.
    pub fn achievements(&self) -> Vec<storage::models::Achievement> {
        let mut achievements: Vec<_> = DISCIPLINES
            .iter()
            .map(|(label, name, kind)| normalize::normalize(*kind, name, &self.raw(label)))
            .collect();
        achievements.push(normalize::normalize_split_time(
            "1500 Meter Lauf",
            &self.raw("1500m"),
            &self.raw("1500sec"),
        ));
        achievements
    }
}

pub fn read_results_rows(path: &Path) -> Result<Vec<ResultsRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize::<HashMap<String, String>>() {
        rows.push(ResultsRow::new(record?));
    }
    Ok(rows)
}

/// Creates the groups seen in the export, then uploads each athlete with
/// their normalized achievements and group membership. Failed rows are
/// logged and the batch continues.
pub async fn upload_results(client: &ApiClient, rows: &[ResultsRow]) -> Result<()> {
    let mut group_numbers: Vec<String> = Vec::new();
    for row in rows {
        let group = row.text("GRP").trim().to_string();
        if !group.is_empty() && !group_numbers.contains(&group) {
            group_numbers.push(group);
        }
    }

    for number in group_numbers {
        let name = format!("Gruppe {number}");
        let created = client
            .create_group(&super::models::GroupUpload {
                name: name.clone(),
                athlete_ids: Vec::new(),
                competition_type: CompetitionType::Decathlon,
            })
            .await?;
        if !created {
            warn!("{name} not uploaded");
        }
    }

    for row in rows {
        if row.text("NAME").trim().is_empty() || row.text("VORNAME").trim().is_empty() {
            continue;
        }

        let name = clean_name(row.text("VORNAME"));
        let surname = clean_name(row.text("NAME"));
        let key = AthleteKey::new(&name, &surname);

        let upload = AthleteUpload {
            name,
            surname,
            gender: registration_gender(row.text("Sex2")),
            achievements: HashMap::new(),
            competition_type: CompetitionType::Decathlon,
            starting_number: row.text("NR").trim().parse().ok(),
            t_shirt: None,
            paid: false,
            birth_date: Some(parse_birthday(row.text("GBDT"))),
        };

        if !client.create_athlete(&upload).await? {
            warn!("athlete {} not uploaded", key.composite());
            continue;
        }

        for achievement in row.achievements() {
            if !client.create_achievement(&key, &achievement).await? {
                warn!(
                    "achievement {} for {} not uploaded",
                    achievement.name(),
                    key.composite()
                );
            }
        }

        let group_name = format!("Gruppe {}", row.text("GRP").trim());
        if !client.add_group_member(&group_name, &key).await? {
            warn!("athlete {} not added to {group_name}", key.composite());
        }
    }

    Ok(())
}
