pub mod attr;
pub mod dump;
pub mod error;
pub mod models;
pub mod store;

pub use error::{Result, StorageError};
pub use models::{
    Achievement, Athlete, AthleteKey, AthleteRef, CompetitionType, Discipline, DisciplineState,
    DistanceResult, Group, HeightResult, Run, SplitDecimal, StartingOrder, TimeGroup, TimeResult,
};
pub use store::{AthleteStore, GroupStore, MemoryStore, TimeTableStore};
