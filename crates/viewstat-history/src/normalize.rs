//! Timestamp, date, and duration normalization.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Failures converting a raw field into its normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("invalid start time '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid duration '{0}'")]
    InvalidDuration(String),
}

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// `[D day[s][,] ]A:BB[:CC[.fff]]`
static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(?P<days>\d+)\s+days?,?\s+)?(?P<a>\d+):(?P<b>\d{2})(?::(?P<c>\d{2}(?:\.\d+)?))?$")
        .expect("Invalid duration regex pattern")
});

/// Parse a `Start Time` cell. RFC 3339 values are converted to UTC.
pub fn parse_start_time(raw: &str) -> Result<NaiveDateTime, NormalizeError> {
    let raw = raw.trim();

    if let Some(parsed) = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    {
        return Ok(parsed);
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.naive_utc());
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| NormalizeError::InvalidTimestamp(raw.to_string()))
}

/// The first day of the month containing `date`; a date on the 1st maps to itself.
pub fn month_begin(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

/// Convert a time-interval string such as `"1:30:00"` into minutes.
///
/// Three components are `H:MM:SS`, two are `H:MM`; an optional leading
/// `N days` is accepted as well.
pub fn parse_duration_minutes(raw: &str) -> Result<f64, NormalizeError> {
    let invalid = || NormalizeError::InvalidDuration(raw.to_string());
    let caps = DURATION_REGEX.captures(raw.trim()).ok_or_else(invalid)?;

    let number = |name: &str| -> Result<f64, NormalizeError> {
        caps.name(name)
            .map_or(Ok(0.0), |m| m.as_str().parse::<f64>().map_err(|_| invalid()))
    };

    let days = number("days")?;
    let a = number("a")?;
    let b = number("b")?;

    let (hours, minutes, seconds) = (a, b, number("c")?);

    if minutes >= 60.0 || seconds >= 60.0 {
        return Err(invalid());
    }

    Ok(days * 1440.0 + hours * 60.0 + minutes + seconds / 60.0)
}
