use serde::{Deserialize, Serialize};

use super::split_decimal::SplitDecimal;

/// A normalized result record for one discipline performed by one athlete.
///
/// Serialized with the variant as the outer tag (`{"Time": {...}}`), which is
/// the shape the store keeps under an athlete's `achievements` map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Achievement {
    Time(TimeResult),
    Distance(DistanceResult),
    Height(HeightResult),
}

impl Achievement {
    pub fn name(&self) -> &str {
        match self {
            Achievement::Time(r) => &r.name,
            Achievement::Distance(r) => &r.name,
            Achievement::Height(r) => &r.name,
        }
    }

    pub fn unit(&self) -> &str {
        match self {
            Achievement::Time(r) => &r.unit,
            Achievement::Distance(r) => &r.unit,
            Achievement::Height(r) => &r.unit,
        }
    }

    /// The flat rendering used when an athlete record is projected into a
    /// spreadsheet row: times and distances as the comma form of their split
    /// value, heights as the bare centimetre integer.
    pub fn cell_value(&self) -> String {
        match self {
            Achievement::Time(r) => r.final_result.to_string(),
            Achievement::Distance(r) => r.final_result.to_string(),
            Achievement::Height(r) => r.final_result.to_string(),
        }
    }
}

/// Result of a timed discipline, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeResult {
    pub name: String,
    pub final_result: SplitDecimal,
    pub unit: String,
}

/// Result of a measured discipline (throws, long jump), in metres, with the
/// three attempt slots the store tracks alongside the final mark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    pub name: String,
    pub first_try: SplitDecimal,
    pub second_try: SplitDecimal,
    pub third_try: SplitDecimal,
    pub final_result: SplitDecimal,
    pub unit: String,
}

/// Result of a height discipline (high jump, pole vault). Heights are whole
/// centimetres; the attempt log is the store's `O`/`X`/`/` string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightResult {
    pub name: String,
    pub start_height: i32,
    pub height_increase: i32,
    pub tries: String,
    pub final_result: i32,
    pub unit: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_variant_tag() {
        let achievement = Achievement::Time(TimeResult {
            name: "100 Meter Lauf".to_string(),
            final_result: SplitDecimal::new(12, 5),
            unit: "s".to_string(),
        });

        let json = serde_json::to_value(&achievement).unwrap();
        assert_eq!(json["Time"]["final_result"]["integral"], 12);
        assert_eq!(json["Time"]["final_result"]["fractional"], 5);
        assert_eq!(json["Time"]["unit"], "s");
    }

    #[test]
    fn test_deserializes_store_shape() {
        let json = r#"
            {
                "Distance": {
                    "name": "Weitsprung",
                    "first_try": { "integral": -1, "fractional": 0 },
                    "second_try": { "integral": -1, "fractional": 0 },
                    "third_try": { "integral": -1, "fractional": 0 },
                    "final_result": { "integral": 5, "fractional": 44 },
                    "unit": "m"
                }
            }
        "#;

        let achievement: Achievement = serde_json::from_str(json).unwrap();
        assert_eq!(achievement.name(), "Weitsprung");
        assert_eq!(achievement.cell_value(), "5,44");
    }

    #[test]
    fn test_height_cell_value_is_centimetres() {
        let achievement = Achievement::Height(HeightResult {
            name: "Hochsprung".to_string(),
            start_height: 80,
            height_increase: 4,
            tries: String::new(),
            final_result: 108,
            unit: "cm".to_string(),
        });

        assert_eq!(achievement.cell_value(), "108");
        assert_eq!(achievement.unit(), "cm");
    }
}
