use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Athlete, AthleteKey, Group, TimeGroup};
use crate::store::{AthleteStore, GroupStore, TimeTableStore};

/// In-memory implementation of all three table repositories.
///
/// Backs the tests and the tools that run against local table dumps.
/// Entries are kept in key order so scans are deterministic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    athletes: RwLock<BTreeMap<String, Athlete>>,
    groups: RwLock<BTreeMap<String, Group>>,
    time_groups: RwLock<BTreeMap<String, TimeGroup>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl AthleteStore for MemoryStore {
    async fn get(&self, key: &AthleteKey) -> Result<Option<Athlete>> {
        Ok(read(&self.athletes).get(&key.composite()).cloned())
    }

    async fn scan(&self) -> Result<Vec<Athlete>> {
        Ok(read(&self.athletes).values().cloned().collect())
    }

    async fn put(&self, athlete: Athlete) -> Result<()> {
        write(&self.athletes).insert(athlete.key().composite(), athlete);
        Ok(())
    }

    async fn delete(&self, key: &AthleteKey) -> Result<()> {
        write(&self.athletes).remove(&key.composite());
        Ok(())
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn get(&self, name: &str) -> Result<Option<Group>> {
        Ok(read(&self.groups).get(name).cloned())
    }

    async fn scan(&self) -> Result<Vec<Group>> {
        Ok(read(&self.groups).values().cloned().collect())
    }

    async fn put(&self, group: Group) -> Result<()> {
        write(&self.groups).insert(group.name.clone(), group);
        Ok(())
    }
}

#[async_trait]
impl TimeTableStore for MemoryStore {
    async fn get(&self, name: &str) -> Result<Option<TimeGroup>> {
        Ok(read(&self.time_groups).get(name).cloned())
    }

    async fn scan(&self) -> Result<Vec<TimeGroup>> {
        Ok(read(&self.time_groups).values().cloned().collect())
    }

    async fn put(&self, time_group: TimeGroup) -> Result<()> {
        write(&self.time_groups)
            .insert(time_group.name.clone(), time_group);
        Ok(())
    }
}
