//! Renders the attendee list: one page per group with first name, last
//! name, age class, payment state and bib number, sorted by last name. The
//! output is a paginated HTML document; turning it into a PDF is the
//! converter's job.

use storage::models::Athlete;
use storage::store::{AthleteStore, GroupStore};
use tracing::warn;

use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub first_name: String,
    pub last_name: String,
    pub age_class: String,
    pub paid: bool,
    pub bib_number: Option<u16>,
}

impl RosterEntry {
    fn from_athlete(athlete: &Athlete) -> Self {
        Self {
            first_name: athlete.name.clone(),
            last_name: athlete.surname.clone(),
            age_class: athlete.age_class(),
            paid: athlete.paid,
            bib_number: athlete.starting_number,
        }
    }
}

/// Collects each group's attendees, sorted by last name. Roster entries
/// without an athlete record are logged and skipped.
pub async fn collect_roster(
    athletes: &dyn AthleteStore,
    groups: &dyn GroupStore,
) -> Result<Vec<(String, Vec<RosterEntry>)>> {
    let athletes = athletes.scan().await?;
    let mut pages = Vec::new();

    for group in groups.scan().await? {
        let mut entries = Vec::new();
        for key in &group.athlete_ids {
            match athletes.iter().find(|a| a.key() == *key) {
                Some(athlete) => entries.push(RosterEntry::from_athlete(athlete)),
                None => warn!(
                    "athlete {} listed in group '{}' has no record, skipping",
                    key.composite(),
                    group.name
                ),
            }
        }
        entries.sort_by(|a, b| a.last_name.cmp(&b.last_name));
        pages.push((group.name, entries));
    }

    Ok(pages)
}

/// Builds the printable HTML document, one page-broken section per group.
pub fn render_html(pages: &[(String, Vec<RosterEntry>)]) -> String {
    let mut body = String::new();

    for (group_name, entries) in pages {
        body.push_str(&format!(
            "<div style=\"page-break-before:always;padding:40px\">\n<h2>{group_name}</h2>\n"
        ));
        body.push_str("<table border=\"1\">\n<thead><tr>");
        for heading in ["Vorname", "Nachname", "Klasse", "Bezahlt", "Startnummer"] {
            body.push_str(&format!("<th>{heading}</th>"));
        }
        body.push_str("</tr></thead>\n<tbody>\n");

        for entry in entries {
            let paid = if entry.paid { "Ja" } else { "Nein" };
            let bib = entry
                .bib_number
                .map(|n| n.to_string())
                .unwrap_or_default();
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                entry.first_name, entry.last_name, entry.age_class, paid, bib
            ));
        }
        body.push_str("</tbody>\n</table>\n</div>\n");
    }

    format!(
        "<html><head><meta charset=\"UTF-8\"></head><body>\n{body}</body></html>\n"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use storage::models::{AthleteKey, CompetitionType, Group};
    use storage::store::MemoryStore;

    use super::*;

    fn athlete(name: &str, surname: &str, paid: bool) -> Athlete {
        Athlete {
            name: name.to_string(),
            surname: surname.to_string(),
            birth_date: None,
            gender: "M".to_string(),
            achievements: HashMap::new(),
            competition_type: CompetitionType::Decathlon,
            starting_number: Some(3),
            paid,
            t_shirt: None,
        }
    }

    async fn seed() -> MemoryStore {
        let store = MemoryStore::new();
        for a in [
            athlete("Zenzi", "Zobel", true),
            athlete("Anna", "Aigner", false),
        ] {
            AthleteStore::put(&store, a).await.unwrap();
        }
        GroupStore::put(
            &store,
            Group {
                name: "Gruppe 1".to_string(),
                competition_type: CompetitionType::Decathlon,
                athlete_ids: vec![
                    AthleteKey::new("Zenzi", "Zobel"),
                    AthleteKey::new("Anna", "Aigner"),
                ],
            },
        )
        .await
        .unwrap();
        store
    }

    #[tokio::test]
    async fn test_roster_is_sorted_by_last_name() {
        let store = seed().await;
        let pages = collect_roster(&store, &store).await.unwrap();

        assert_eq!(pages.len(), 1);
        let (group, entries) = &pages[0];
        assert_eq!(group, "Gruppe 1");
        assert_eq!(entries[0].last_name, "Aigner");
        assert_eq!(entries[1].last_name, "Zobel");
    }

    #[tokio::test]
    async fn test_html_has_one_page_per_group_and_paid_flags() {
        let store = seed().await;
        let pages = collect_roster(&store, &store).await.unwrap();
        let html = render_html(&pages);

        assert_eq!(html.matches("page-break-before").count(), 1);
        assert!(html.contains("<h2>Gruppe 1</h2>"));
        assert!(html.contains("<td>Zobel</td><td>M</td><td>Ja</td><td>3</td>"));
        assert!(html.contains("<td>Aigner</td><td>M</td><td>Nein</td><td>3</td>"));
    }
}
