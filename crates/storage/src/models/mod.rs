mod achievement;
mod athlete;
mod group;
mod split_decimal;
mod timetable;

pub use achievement::{Achievement, DistanceResult, HeightResult, TimeResult};
pub use athlete::{Athlete, AthleteKey};
pub use group::{CompetitionType, Group};
pub use split_decimal::SplitDecimal;
pub use timetable::{AthleteRef, Discipline, DisciplineState, Run, StartingOrder, TimeGroup};
