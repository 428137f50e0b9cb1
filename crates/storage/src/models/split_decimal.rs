use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A decimal result stored as two integers: the integral part and the
/// fractional part in hundredths. The store keeps every discipline result in
/// this shape; it is fixed-point, not a floating type.
///
/// An integral part of `-1` is the sentinel for "did not attempt / no
/// record".
///
/// # Examples
///
/// ```
/// use storage::models::SplitDecimal;
///
/// let result: SplitDecimal = "9,20".parse().unwrap();
/// assert_eq!(result, SplitDecimal::new(9, 20));
/// assert_eq!(result.to_string(), "9,20");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SplitDecimal {
    pub integral: i32,
    pub fractional: i32,
}

impl SplitDecimal {
    /// Marker value for "did not attempt / no record".
    pub const SENTINEL: SplitDecimal = SplitDecimal {
        integral: -1,
        fractional: 0,
    };

    pub fn new(integral: i32, fractional: i32) -> Self {
        Self {
            integral,
            fractional,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.integral == -1
    }

    /// Rounds to two decimal places, then splits into integral part and
    /// hundredths.
    pub fn from_decimal(value: Decimal) -> Self {
        let rounded = value.round_dp(2);
        let integral = rounded.trunc();
        let hundredths = ((rounded - integral) * Decimal::ONE_HUNDRED).round();

        Self {
            integral: integral.to_i32().unwrap_or(0),
            fractional: hundredths.abs().to_i32().unwrap_or(0),
        }
    }

    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.integral) * 100 + i64::from(self.fractional), 2)
    }

    pub fn to_f64(&self) -> f64 {
        f64::from(self.integral) + f64::from(self.fractional) / 100.0
    }
}

impl fmt::Display for SplitDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{:02}", self.integral, self.fractional)
    }
}

impl FromStr for SplitDecimal {
    type Err = rust_decimal::Error;

    /// Accepts both `.` and `,` as the decimal separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(',', ".");
        Decimal::from_str(&normalized).map(Self::from_decimal)
    }
}
