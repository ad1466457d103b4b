//! Token lifetime parsing (`"7d"`, `"12h"`, `"1ms"`, `"1.5 hours"`).
//!
//! Grammar: a decimal number followed by an optional unit. A bare number is
//! milliseconds. Units are case-insensitive and accept short and long forms.

use core::str::FromStr;

use chrono::Duration;
use thiserror::Error;

/// Default lifetime in days when none is configured (`"7d"`).
pub const DEFAULT_LIFETIME_DAYS: i64 = 7;

/// Longest accepted lifetime in days (100 years). Anything longer would push
/// `expires_at` towards the edge of the representable time range.
pub const MAX_LIFETIME_DAYS: i64 = 36_525;

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60.0 * MS_PER_SECOND;
const MS_PER_HOUR: f64 = 60.0 * MS_PER_MINUTE;
const MS_PER_DAY: f64 = 24.0 * MS_PER_HOUR;
const MS_PER_WEEK: f64 = 7.0 * MS_PER_DAY;
const MS_PER_YEAR: f64 = 365.25 * MS_PER_DAY;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LifetimeError {
    #[error("lifetime is empty")]
    Empty,

    #[error("invalid number in lifetime '{0}'")]
    InvalidNumber(String),

    #[error("unknown unit '{0}' (expected ms, s, m, h, d, w or y)")]
    UnknownUnit(String),

    #[error("lifetime '{0}' must be positive")]
    NotPositive(String),

    #[error("lifetime '{0}' is out of range")]
    OutOfRange(String),
}

/// Validity period of an issued session token. Always strictly positive and
/// at most [`MAX_LIFETIME_DAYS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Lifetime(Duration);

impl Lifetime {
    pub fn new(duration: Duration) -> Result<Self, LifetimeError> {
        if duration <= Duration::zero() {
            return Err(LifetimeError::NotPositive(format!("{}ms", duration.num_milliseconds())));
        }
        if duration > Duration::days(MAX_LIFETIME_DAYS) {
            return Err(LifetimeError::OutOfRange(format!("{}ms", duration.num_milliseconds())));
        }
        Ok(Self(duration))
    }

    pub fn as_duration(&self) -> Duration {
        self.0
    }
}

impl Default for Lifetime {
    fn default() -> Self {
        Self(Duration::days(DEFAULT_LIFETIME_DAYS))
    }
}

impl core::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}ms", self.0.num_milliseconds())
    }
}

impl FromStr for Lifetime {
    type Err = LifetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.is_empty() {
            return Err(LifetimeError::Empty);
        }

        let split = input
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
            .unwrap_or(input.len());
        let (number, unit) = input.split_at(split);

        let value: f64 = number
            .parse()
            .map_err(|_| LifetimeError::InvalidNumber(input.to_string()))?;
        let ms = value * unit_millis(unit.trim())?;

        if !ms.is_finite() || ms.abs() > MAX_LIFETIME_DAYS as f64 * MS_PER_DAY {
            return Err(LifetimeError::OutOfRange(input.to_string()));
        }

        let ms = ms.round() as i64;
        if ms <= 0 {
            return Err(LifetimeError::NotPositive(input.to_string()));
        }

        Duration::try_milliseconds(ms)
            .ok_or_else(|| LifetimeError::OutOfRange(input.to_string()))
            .and_then(|duration| {
                Self::new(duration).map_err(|_| LifetimeError::OutOfRange(input.to_string()))
            })
    }
}

fn unit_millis(unit: &str) -> Result<f64, LifetimeError> {
    let millis = match unit.to_ascii_lowercase().as_str() {
        "" | "ms" | "msec" | "msecs" | "millisecond" | "milliseconds" => 1.0,
        "s" | "sec" | "secs" | "second" | "seconds" => MS_PER_SECOND,
        "m" | "min" | "mins" | "minute" | "minutes" => MS_PER_MINUTE,
        "h" | "hr" | "hrs" | "hour" | "hours" => MS_PER_HOUR,
        "d" | "day" | "days" => MS_PER_DAY,
        "w" | "week" | "weeks" => MS_PER_WEEK,
        "y" | "yr" | "yrs" | "year" | "years" => MS_PER_YEAR,
        _ => return Err(LifetimeError::UnknownUnit(unit.to_string())),
    };
    Ok(millis)
}
