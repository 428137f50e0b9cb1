use serde::{Deserialize, Serialize};

use super::athlete::AthleteKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompetitionType {
    Triathlon,
    Pentathlon,
    Heptathlon,
    Decathlon,
}

impl CompetitionType {
    /// The competition type implied by how many disciplines a group runs.
    pub fn from_discipline_count(count: usize) -> Option<Self> {
        match count {
            3 => Some(Self::Triathlon),
            5 => Some(Self::Pentathlon),
            7 => Some(Self::Heptathlon),
            10 => Some(Self::Decathlon),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Triathlon => "Triathlon",
            Self::Pentathlon => "Pentathlon",
            Self::Heptathlon => "Heptathlon",
            Self::Decathlon => "Decathlon",
        }
    }
}

/// A named heat of athletes competing together. The roster order is the
/// display order, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub competition_type: CompetitionType,
    pub athlete_ids: Vec<AthleteKey>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_discipline_count() {
        assert_eq!(
            CompetitionType::from_discipline_count(3),
            Some(CompetitionType::Triathlon)
        );
        assert_eq!(
            CompetitionType::from_discipline_count(5),
            Some(CompetitionType::Pentathlon)
        );
        assert_eq!(
            CompetitionType::from_discipline_count(7),
            Some(CompetitionType::Heptathlon)
        );
        assert_eq!(
            CompetitionType::from_discipline_count(10),
            Some(CompetitionType::Decathlon)
        );
        assert_eq!(CompetitionType::from_discipline_count(4), None);
    }

    #[test]
    fn test_competition_type_serializes_as_name() {
        let json = serde_json::to_value(CompetitionType::Decathlon).unwrap();
        assert_eq!(json, "Decathlon");
    }
}
