//! Whole-table scan dumps in the store's native attribute-typed JSON
//! (`{"Items": [...]}` per table). The tools run against these files when no
//! live store is reachable, and write them back after mutating.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::attr::{self, AttrItem, AttrValue};
use crate::error::Result;
use crate::models::{Athlete, Group, TimeGroup};
use crate::store::{
    ATHLETE_TABLE, AthleteStore, GROUP_TABLE, GroupStore, MemoryStore, TIME_GROUP_TABLE,
    TimeTableStore,
};

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TableDump {
    #[serde(rename = "Items")]
    pub items: Vec<AttrItem>,
}

/// Loads `<table>.json` dumps from a directory into a fresh in-memory
/// store. Missing table files leave that table empty.
pub async fn load_store(dir: &Path) -> Result<MemoryStore> {
    let store = MemoryStore::new();

    for athlete in read_table::<Athlete>(dir, ATHLETE_TABLE)? {
        AthleteStore::put(&store, athlete).await?;
    }
    for group in read_table::<Group>(dir, GROUP_TABLE)? {
        GroupStore::put(&store, group).await?;
    }
    for time_group in read_table::<TimeGroup>(dir, TIME_GROUP_TABLE)? {
        TimeTableStore::put(&store, time_group).await?;
    }

    Ok(store)
}

/// Writes all three tables back as dump files.
pub async fn save_store(store: &MemoryStore, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;

    let mut athletes = TableDump::default();
    for athlete in AthleteStore::scan(store).await? {
        let mut item = attr::encode_item(&athlete)?;
        // The table's key attribute is redundant with the name fields but
        // present on every stored record.
        item.insert(
            "athlete_id".to_string(),
            AttrValue::S(athlete.key().composite()),
        );
        athletes.items.push(item);
    }
    write_table(dir, ATHLETE_TABLE, &athletes)?;

    let mut groups = TableDump::default();
    for group in GroupStore::scan(store).await? {
        groups.items.push(attr::encode_item(&group)?);
    }
    write_table(dir, GROUP_TABLE, &groups)?;

    let mut time_groups = TableDump::default();
    for time_group in TimeTableStore::scan(store).await? {
        time_groups.items.push(attr::encode_item(&time_group)?);
    }
    write_table(dir, TIME_GROUP_TABLE, &time_groups)?;

    Ok(())
}

fn read_table<T: DeserializeOwned>(dir: &Path, table: &str) -> Result<Vec<T>> {
    let path = dir.join(format!("{table}.json"));
    if !path.exists() {
        warn!("no dump for {table} at {}, table stays empty", path.display());
        return Ok(Vec::new());
    }

    let dump: TableDump = serde_json::from_str(&fs::read_to_string(&path)?)?;
    let mut records = Vec::with_capacity(dump.items.len());
    for item in &dump.items {
        records.push(attr::decode_item(item)?);
    }
    info!("loaded {} records from {table}", records.len());
    Ok(records)
}

fn write_table(dir: &Path, table: &str, dump: &TableDump) -> Result<()> {
    let path = dir.join(format!("{table}.json"));
    fs::write(&path, serde_json::to_string_pretty(dump)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use crate::models::{AthleteKey, CompetitionType};

    use super::*;

    async fn sample_store() -> MemoryStore {
        let store = MemoryStore::new();
        let athlete = Athlete {
            name: "Harald".to_string(),
            surname: "Polt".to_string(),
            birth_date: None,
            gender: "M".to_string(),
            achievements: HashMap::new(),
            competition_type: CompetitionType::Decathlon,
            starting_number: Some(7),
            paid: true,
            t_shirt: Some("L".to_string()),
        };
        AthleteStore::put(&store, athlete).await.unwrap();
        GroupStore::put(
            &store,
            Group {
                name: "Gruppe 1".to_string(),
                competition_type: CompetitionType::Decathlon,
                athlete_ids: vec![AthleteKey::new("Harald", "Polt")],
            },
        )
        .await
        .unwrap();
        store
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = sample_store().await;

        save_store(&store, dir.path()).await.unwrap();
        let reloaded = load_store(dir.path()).await.unwrap();

        let key = AthleteKey::new("Harald", "Polt");
        let athlete = AthleteStore::get(&reloaded, &key).await.unwrap().unwrap();
        assert_eq!(athlete.starting_number, Some(7));
        assert!(athlete.paid);

        let group = GroupStore::get(&reloaded, "Gruppe 1").await.unwrap().unwrap();
        assert_eq!(group.athlete_ids, vec![key]);
    }

    #[tokio::test]
    async fn test_saved_athlete_dump_carries_key_attribute() {
        let dir = tempfile::tempdir().unwrap();
        save_store(&sample_store().await, dir.path()).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join("athlete_store.json")).unwrap();
        let dump: TableDump = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            dump.items[0].get("athlete_id"),
            Some(&AttrValue::S("Harald_Polt".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_dump_file_leaves_table_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load_store(dir.path()).await.unwrap();
        assert!(AthleteStore::scan(&store).await.unwrap().is_empty());
    }
}
