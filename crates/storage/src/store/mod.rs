mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Athlete, AthleteKey, Group, TimeGroup};

/// Table names as the event's key-value store knows them.
pub const ATHLETE_TABLE: &str = "athlete_store";
pub const GROUP_TABLE: &str = "group_store";
pub const TIME_GROUP_TABLE: &str = "time_group_store";

/// Repository over the `athlete_store` table, keyed by the composite
/// name key.
#[async_trait]
pub trait AthleteStore: Send + Sync {
    async fn get(&self, key: &AthleteKey) -> Result<Option<Athlete>>;
    async fn scan(&self) -> Result<Vec<Athlete>>;
    async fn put(&self, athlete: Athlete) -> Result<()>;
    async fn delete(&self, key: &AthleteKey) -> Result<()>;
}

/// Repository over the `group_store` table, keyed by group name.
#[async_trait]
pub trait GroupStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<Group>>;
    async fn scan(&self) -> Result<Vec<Group>>;
    async fn put(&self, group: Group) -> Result<()>;
}

/// Repository over the `time_group_store` table, keyed by group name.
#[async_trait]
pub trait TimeTableStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<Option<TimeGroup>>;
    async fn scan(&self) -> Result<Vec<TimeGroup>>;
    async fn put(&self, time_group: TimeGroup) -> Result<()>;
}
