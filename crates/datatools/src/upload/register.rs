use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use storage::models::{AthleteKey, CompetitionType};
use tracing::warn;

use super::client::ApiClient;
use super::models::{AthleteUpload, GroupUpload};
use crate::error::Result;

/// Pause between successive athlete uploads, to stay polite to the API.
const UPLOAD_PAUSE: Duration = Duration::from_millis(100);

/// Substituted when a registration row carries no usable birthday.
const FALLBACK_BIRTHDAY: (i32, u32, u32) = (1990, 1, 1);

/// One row of the decathlon registration list.
#[derive(Debug, Clone, Deserialize)]
pub struct DecathlonRow {
    #[serde(rename = "Gruppe")]
    pub group: String,
    #[serde(rename = "Vorname")]
    pub first_name: String,
    #[serde(rename = "Name")]
    pub last_name: String,
    #[serde(rename = "Geburtstag")]
    pub birthday: String,
    #[serde(rename = "Geschlecht")]
    pub gender: String,
    #[serde(rename = "Bezahlt")]
    pub paid: String,
    #[serde(rename = "T-Shirt")]
    pub t_shirt: String,
}

/// One row of the kids-and-youth registration list.
#[derive(Debug, Clone, Deserialize)]
pub struct KidsRow {
    #[serde(rename = "Gruppe")]
    pub group: String,
    #[serde(rename = "Vorname")]
    pub first_name: String,
    #[serde(rename = "Name")]
    pub last_name: String,
    #[serde(rename = "Geburtsdatum")]
    pub birthday: String,
    #[serde(rename = "Geschlecht")]
    pub gender: String,
    #[serde(rename = "Bezahlt")]
    pub paid: String,
    #[serde(rename = "T-Shirt")]
    pub t_shirt: String,
}

pub fn read_decathlon_rows(path: &Path) -> Result<Vec<DecathlonRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    Ok(reader.deserialize().collect::<std::result::Result<_, _>>()?)
}

pub fn read_kids_rows(path: &Path) -> Result<Vec<KidsRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    Ok(reader.deserialize().collect::<std::result::Result<_, _>>()?)
}

/// Creates the decathlon groups, then registers every athlete into their
/// `Gruppe N`. A failed row is logged and the batch keeps going.
pub async fn upload_decathlon(client: &ApiClient, rows: &[DecathlonRow]) -> Result<()> {
    let mut group_numbers: Vec<&str> = Vec::new();
    for row in rows {
        let group = row.group.trim();
        if !group.is_empty() && !group_numbers.contains(&group) {
            group_numbers.push(group);
        }
    }

    for number in group_numbers {
        let name = format!("Gruppe {number}");
        let created = client
            .create_group(&GroupUpload {
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
        if row.first_name.trim().is_empty() || row.last_name.trim().is_empty() {
            continue;
        }
        let group_name = format!("Gruppe {}", row.group.trim());
        let uploaded = register_athlete(
            client,
            &row.first_name,
            &row.last_name,
            &row.gender,
            &row.birthday,
            &row.paid,
            &row.t_shirt,
            &group_name,
            CompetitionType::Decathlon,
        )
        .await?;
        tokio::time::sleep(UPLOAD_PAUSE).await;

        if !uploaded {
            warn!("athlete {} {} not uploaded", row.first_name, row.last_name);
        }
    }

    Ok(())
}

/// Creates the kids and youth groups, then registers their athletes. The
/// youngest two brackets share one group; the competition type follows the
/// bracket.
pub async fn upload_kids(client: &ApiClient, rows: &[KidsRow]) -> Result<()> {
    let mut group_names: Vec<String> = Vec::new();
    for row in rows {
        let name = kids_group_name(row.group.trim());
        if !name.is_empty() && !group_names.contains(&name) {
            group_names.push(name);
        }
    }

    for name in group_names {
        let created = client
            .create_group(&GroupUpload {
                name: name.clone(),
                athlete_ids: Vec::new(),
                competition_type: kids_competition_type(&name),
            })
            .await?;
        if !created {
            warn!("{name} not uploaded");
        }
    }

    for row in rows {
        if row.first_name.trim().is_empty() || row.last_name.trim().is_empty() {
            continue;
        }
        let group_name = kids_group_name(row.group.trim());
        let uploaded = register_athlete(
            client,
            &row.first_name,
            &row.last_name,
            &row.gender,
            &row.birthday,
            &row.paid,
            &row.t_shirt,
            &group_name,
            kids_competition_type(&group_name),
        )
        .await?;
        tokio::time::sleep(UPLOAD_PAUSE).await;

        if !uploaded {
            warn!("athlete {} {} not uploaded", row.first_name, row.last_name);
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn register_athlete(
    client: &ApiClient,
    first_name: &str,
    last_name: &str,
    gender: &str,
    birthday: &str,
    paid: &str,
    t_shirt: &str,
    group_name: &str,
    competition_type: CompetitionType,
) -> Result<bool> {
    let name = clean_name(first_name);
    let surname = clean_name(last_name);

    let upload = AthleteUpload {
        name: name.clone(),
        surname: surname.clone(),
        gender: registration_gender(gender),
        achievements: HashMap::new(),
        competition_type,
        starting_number: None,
        t_shirt: some_if_present(t_shirt),
        paid: parse_paid(paid),
        birth_date: Some(parse_birthday(birthday)),
    };

    if !client.create_athlete(&upload).await? {
        return Ok(false);
    }
    client
        .add_group_member(group_name, &AthleteKey::new(&name, &surname))
        .await
}

/// Dots inside registration names break the composite key derivation
/// downstream, so they become spaces.
pub(super) fn clean_name(raw: &str) -> String {
    raw.replace('.', " ").trim().to_string()
}

fn some_if_present(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Registration genders are uppercased; rows without one are relay teams.
pub(super) fn registration_gender(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Staffel".to_string()
    } else {
        trimmed.to_uppercase()
    }
}

/// The paid column holds the installment count; 1 to 3 all mean paid.
fn parse_paid(raw: &str) -> bool {
    matches!(raw.trim().parse::<i32>(), Ok(1..=3))
}

/// Birthdays arrive as `D.M.YYYY` or `YYYY-MM-DD`, sometimes with a time
/// suffix. Anything else gets the fixed fallback date.
pub(super) fn parse_birthday(raw: &str) -> i64 {
    let date_part = raw.trim().split(' ').next().unwrap_or("");

    let parsed = if date_part.contains('.') {
        NaiveDate::parse_from_str(date_part, "%d.%m.%Y").ok()
    } else if date_part.contains('-') {
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    } else {
        None
    };

    let date = parsed.unwrap_or_else(|| {
        let (year, month, day) = FALLBACK_BIRTHDAY;
        warn!("unparseable birthday '{raw}', using {day}.{month}.{year}");
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    });

    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(0)
}

/// The two youngest brackets compete as one group.
fn kids_group_name(raw: &str) -> String {
    match raw {
        "U4" | "U6" => "U4/U6".to_string(),
        other => other.to_string(),
    }
}

fn kids_competition_type(group: &str) -> CompetitionType {
    match group {
        "U14" => CompetitionType::Pentathlon,
        "U16" => CompetitionType::Heptathlon,
        _ => CompetitionType::Triathlon,
    }
}
