//! Turns raw registration/sheet values into the store's typed shapes: the
//! comma-decimal score parser, the per-kind achievement constructors, the
//! legacy birth-date decoder and the gender normalizer.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use storage::models::{
    Achievement, DistanceResult, HeightResult, SplitDecimal, TimeResult,
};
use tracing::warn;

/// Substituted whenever a stored birth date cannot be decoded.
pub const DEFAULT_BIRTH_DATE: &str = "1.1.1970";

/// A raw cell value as it arrives from an export: text, a number, or
/// nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Text(String),
    Number(f64),
    Missing,
}

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

/// Which of the three achievement shapes a discipline produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisciplineKind {
    Time,
    Distance,
    Height,
}

/// Parses a raw score with comma decimal separator. A leading `-`, an
/// unparseable value, or no value at all yields the sentinel.
pub fn parse_score(raw: &RawValue) -> SplitDecimal {
    match raw {
        RawValue::Missing => SplitDecimal::SENTINEL,
        RawValue::Number(n) => {
            if n.is_nan() || *n < 0.0 {
                return SplitDecimal::SENTINEL;
            }
            Decimal::from_f64(*n)
                .map(SplitDecimal::from_decimal)
                .unwrap_or(SplitDecimal::SENTINEL)
        }
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.starts_with('-') {
                return SplitDecimal::SENTINEL;
            }
            match trimmed.parse::<SplitDecimal>() {
                Ok(value) => value,
                Err(_) => {
                    warn!("unparseable score '{trimmed}', recording as no attempt");
                    SplitDecimal::SENTINEL
                }
            }
        }
    }
}

/// Builds the typed achievement for one discipline from a single raw value.
pub fn normalize(kind: DisciplineKind, name: &str, raw: &RawValue) -> Achievement {
    match kind {
        DisciplineKind::Time => Achievement::Time(TimeResult {
            name: name.to_string(),
            final_result: parse_score(raw),
            unit: "s".to_string(),
        }),
        DisciplineKind::Distance => Achievement::Distance(DistanceResult {
            name: name.to_string(),
            first_try: SplitDecimal::SENTINEL,
            second_try: SplitDecimal::SENTINEL,
            third_try: SplitDecimal::SENTINEL,
            final_result: parse_score(raw),
            unit: "m".to_string(),
        }),
        DisciplineKind::Height => Achievement::Height(HeightResult {
            name: name.to_string(),
            start_height: -1,
            height_increase: -1,
            tries: String::new(),
            final_result: height_centimetres(raw),
            unit: "cm".to_string(),
        }),
    }
}

/// Builds a time achievement from a source that stores minutes and seconds
/// in separate columns; the total is `minutes * 60 + seconds`.
pub fn normalize_split_time(name: &str, minutes: &RawValue, seconds: &RawValue) -> Achievement {
    let minutes = parse_score(minutes);
    let seconds = parse_score(seconds);

    let final_result = if minutes.is_sentinel() || seconds.is_sentinel() {
        SplitDecimal::SENTINEL
    } else {
        let total = minutes.to_decimal() * Decimal::from(60) + seconds.to_decimal();
        SplitDecimal::from_decimal(total.round_dp(2))
    };

    Achievement::Time(TimeResult {
        name: name.to_string(),
        final_result,
        unit: "s".to_string(),
    })
}

/// Splits a total-seconds result back into the (minutes, seconds) pair the
/// sheet keeps in two columns.
pub fn split_minutes(total: SplitDecimal) -> (i32, SplitDecimal) {
    let minutes = total.integral / 60;
    (
        minutes,
        SplitDecimal::new(total.integral % 60, total.fractional),
    )
}

/// Heights are stored as whole centimetres. Negative, zero, missing and
/// unparseable inputs all collapse to 0 here, not to the sentinel; the two
/// policies are intentionally kept apart.
pub fn height_centimetres(raw: &RawValue) -> i32 {
    let metres = match raw {
        RawValue::Missing => return 0,
        RawValue::Number(n) => {
            if n.is_nan() {
                return 0;
            }
            Decimal::from_f64(*n).unwrap_or(Decimal::ZERO)
        }
        RawValue::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() || trimmed.starts_with('-') {
                return 0;
            }
            match Decimal::from_str(&trimmed.replace(',', ".")) {
                Ok(value) => value,
                Err(_) => {
                    warn!("unparseable height '{trimmed}', recording as 0");
                    return 0;
                }
            }
        }
    };

    if metres <= Decimal::ZERO {
        return 0;
    }
    (metres * Decimal::ONE_HUNDRED)
        .round()
        .to_i32()
        .unwrap_or(0)
}

/// Renders a stored epoch value as `D.M.YYYY`, substituting a fixed default
/// when the value cannot be decoded.
pub fn format_birth_date(raw: &RawValue) -> String {
    let decoded = match raw {
        RawValue::Text(s) => decode_birth_date(s),
        RawValue::Number(n) if !n.is_nan() => decode_birth_date(&(*n as i64).to_string()),
        _ => None,
    };

    match decoded {
        Some(date) => format!("{}.{}.{}", date.day(), date.month(), date.year()),
        None => {
            warn!("could not decode birth date {raw:?}, using {DEFAULT_BIRTH_DATE}");
            DEFAULT_BIRTH_DATE.to_string()
        }
    }
}

/// Decodes a stored birth-date epoch value.
///
/// Pre-epoch values were written scaled: when the string form leads with
/// `-` the seconds are recovered by dividing by 10^5, or 10^4 for the
/// shorter renderings. Kept exactly as the historical data requires.
pub fn decode_birth_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    let value: i64 = trimmed.parse().ok()?;

    let seconds = if trimmed.starts_with('-') {
        if trimmed.len() >= 10 {
            value.div_euclid(100_000)
        } else {
            value.div_euclid(10_000)
        }
    } else {
        value
    };

    Utc.timestamp_opt(seconds, 0).single()
}

/// Lowercases a stored gender; the relay-team marker maps to `-`.
pub fn normalize_gender(raw: &str) -> String {
    let gender = raw.to_lowercase();
    if gender == "staffel" {
        "-".to_string()
    } else {
        gender
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_score_comma_decimal() {
        assert_eq!(
            parse_score(&RawValue::text("11,87")),
            SplitDecimal::new(11, 87)
        );
        assert_eq!(
            parse_score(&RawValue::text("62.5")),
            SplitDecimal::new(62, 50)
        );
    }

    #[test]
    fn test_parse_score_sentinel_cases() {
        assert!(parse_score(&RawValue::Missing).is_sentinel());
        assert!(parse_score(&RawValue::Number(f64::NAN)).is_sentinel());
        assert!(parse_score(&RawValue::text("-1,0")).is_sentinel());
        assert!(parse_score(&RawValue::text("-5,2")).is_sentinel());
        assert!(parse_score(&RawValue::text("abgemeldet")).is_sentinel());
        assert!(parse_score(&RawValue::text("")).is_sentinel());
    }

    #[test]
    fn test_normalize_time() {
        let achievement = normalize(
            DisciplineKind::Time,
            "100 Meter Lauf",
            &RawValue::text("12,34"),
        );
        match achievement {
            Achievement::Time(time) => {
                assert_eq!(time.final_result, SplitDecimal::new(12, 34));
                assert_eq!(time.unit, "s");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_distance_leaves_tries_unpopulated() {
        let achievement = normalize(
            DisciplineKind::Distance,
            "Weitsprung",
            &RawValue::Number(5.44),
        );
        match achievement {
            Achievement::Distance(distance) => {
                assert_eq!(distance.final_result, SplitDecimal::new(5, 44));
                assert!(distance.first_try.is_sentinel());
                assert!(distance.second_try.is_sentinel());
                assert!(distance.third_try.is_sentinel());
                assert_eq!(distance.unit, "m");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_normalize_height_rounds_to_centimetres() {
        let achievement = normalize(
            DisciplineKind::Height,
            "Hochsprung",
            &RawValue::text("1,08"),
        );
        match achievement {
            Achievement::Height(height) => {
                assert_eq!(height.final_result, 108);
                assert_eq!(height.unit, "cm");
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_height_invalid_is_zero_not_sentinel() {
        assert_eq!(height_centimetres(&RawValue::text("-1,0")), 0);
        assert_eq!(height_centimetres(&RawValue::Missing), 0);
        assert_eq!(height_centimetres(&RawValue::text("dnf")), 0);
        assert_eq!(height_centimetres(&RawValue::Number(0.0)), 0);
    }

    #[test]
    fn test_height_round_trip_within_one_centimetre() {
        for raw in ["1,08", "2,125", "0,80", "4,01"] {
            let cm = height_centimetres(&RawValue::text(raw));
            let metres = f64::from(cm) / 100.0;
            let again = height_centimetres(&RawValue::Number(metres));
            assert!((cm - again).abs() <= 1, "{raw}: {cm} vs {again}");
        }
    }

    #[test]
    fn test_split_time_reconstructs_total_seconds() {
        let achievement = normalize_split_time(
            "1500 Meter Lauf",
            &RawValue::Number(4.0),
            &RawValue::text("31,5"),
        );
        match achievement {
            Achievement::Time(time) => {
                assert_eq!(time.final_result, SplitDecimal::new(271, 50));
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_split_time_missing_minutes_is_sentinel() {
        let achievement =
            normalize_split_time("1500 Meter Lauf", &RawValue::Missing, &RawValue::text("31"));
        match achievement {
            Achievement::Time(time) => assert!(time.final_result.is_sentinel()),
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_split_minutes_inverts_reconstruction() {
        let (minutes, seconds) = split_minutes(SplitDecimal::new(271, 50));
        assert_eq!(minutes, 4);
        assert_eq!(seconds, SplitDecimal::new(31, 50));
    }

    #[test]
    fn test_birth_date_plain_epoch() {
        assert_eq!(
            format_birth_date(&RawValue::text("634521600")),
            "9.2.1990"
        );
    }

    #[test]
    fn test_birth_date_long_negative_scaled() {
        // 11 characters including the sign: scaled by 10^5.
        let date = decode_birth_date("-3156192000").unwrap();
        assert_eq!((date.year(), date.month()), (1969, 12));
    }

    #[test]
    fn test_birth_date_short_negative_scaled() {
        // 9 characters including the sign: scaled by 10^4.
        let date = decode_birth_date("-31561920").unwrap();
        assert_eq!((date.year(), date.month()), (1969, 12));
    }

    #[test]
    fn test_birth_date_unparseable_uses_default() {
        assert_eq!(format_birth_date(&RawValue::text("not a date")), "1.1.1970");
        assert_eq!(format_birth_date(&RawValue::Missing), "1.1.1970");
    }

    #[test]
    fn test_normalize_gender() {
        assert_eq!(normalize_gender("M"), "m");
        assert_eq!(normalize_gender("W"), "w");
        assert_eq!(normalize_gender("Staffel"), "-");
    }
}
