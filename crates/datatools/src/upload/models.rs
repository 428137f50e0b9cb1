use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use storage::models::{Achievement, AthleteKey, CompetitionType};

/// Body for `POST /api/athlete`. Registration never carries results, so the
/// achievements map goes up empty.
#[derive(Debug, Clone, Serialize)]
pub struct AthleteUpload {
    pub name: String,
    pub surname: String,
    pub gender: String,
    pub achievements: HashMap<String, Achievement>,
    pub competition_type: CompetitionType,
    pub starting_number: Option<u16>,
    pub t_shirt: Option<String>,
    pub paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<i64>,
}

/// Body for `POST /api/group`.
#[derive(Debug, Clone, Serialize)]
pub struct GroupUpload {
    pub name: String,
    pub athlete_ids: Vec<AthleteKey>,
    pub competition_type: CompetitionType,
}

/// Body for `PUT /api/group?name=`: the athletes to splice into the roster.
#[derive(Debug, Clone, Serialize)]
pub struct GroupMemberUpdate {
    pub athlete_ids: Vec<AthleteKey>,
}

/// A raw timetable file as handed to `POST /api/time_table`. The `Groups`
/// object also drives which groups get created, with the competition type
/// implied by each group's discipline count.
#[derive(Debug, Clone)]
pub struct TimetableFile {
    raw: Value,
}

impl TimetableFile {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn as_value(&self) -> &Value {
        &self.raw
    }

    pub fn group_competition_types(&self) -> Vec<(String, Option<CompetitionType>)> {
        let Some(groups) = self.raw.get("Groups").and_then(Value::as_object) else {
            return Vec::new();
        };

        groups
            .iter()
            .map(|(name, disciplines)| {
                let count = disciplines.as_object().map_or(0, |d| d.len());
                (name.clone(), CompetitionType::from_discipline_count(count))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_athlete_upload_skips_absent_birth_date() {
        let upload = AthleteUpload {
            name: "Anna".to_string(),
            surname: "Aigner".to_string(),
            gender: "W".to_string(),
            achievements: HashMap::new(),
            competition_type: CompetitionType::Decathlon,
            starting_number: None,
            t_shirt: None,
            paid: false,
            birth_date: None,
        };

        let json = serde_json::to_value(&upload).unwrap();
        assert!(json.get("birth_date").is_none());
        // The other optional fields still travel as explicit nulls.
        assert!(json["starting_number"].is_null());
    }

    #[test]
    fn test_timetable_group_types_from_discipline_count() {
        let timetable = TimetableFile::new(serde_json::json!({
            "Groups": {
                "Gruppe 1": {
                    "100 Meter Lauf": {}, "Weitsprung": {}, "Kugelstoß": {},
                    "Hochsprung": {}, "400 Meter Lauf": {}, "110 Meter Hürden": {},
                    "Diskuswurf": {}, "Stabhochsprung": {}, "Speerwurf": {},
                    "1500 Meter Lauf": {}
                },
                "U8": { "60 Meter Lauf": {}, "Weitsprung": {}, "Schlagballwurf": {} },
                "Kaputt": { "a": {}, "b": {} }
            }
        }));

        let mut types = timetable.group_competition_types();
        types.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            types,
            vec![
                ("Gruppe 1".to_string(), Some(CompetitionType::Decathlon)),
                ("Kaputt".to_string(), None),
                ("U8".to_string(), Some(CompetitionType::Triathlon)),
            ]
        );
    }
}
