//! Viewing-history record types.

use crate::normalize::{month_begin, parse_duration_minutes, NormalizeError};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Supplemental video type marking trailers and teasers.
pub const TRAILER: &str = "TRAILER";

/// One row of the raw viewing history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewingRecord {
    pub start_time: NaiveDateTime,
    pub title: String,
    pub device_type: String,
    /// Duration exactly as exported, e.g. `"0:45:12"`.
    pub duration: String,
    pub profile_name: String,
    /// Empty for regular titles, `TRAILER`, `HOOK`, etc. otherwise.
    pub supplemental_video_type: String,
}

impl ViewingRecord {
    /// Whether this viewing was a trailer rather than a watch.
    pub fn is_trailer(&self) -> bool {
        self.supplemental_video_type == TRAILER
    }
}

/// A viewing record with its derived date and duration fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedViewingRecord {
    pub record: ViewingRecord,
    pub start_date: NaiveDate,
    /// Always the 1st of the month containing `start_date`.
    pub month_begin: NaiveDate,
    /// Never negative.
    pub duration_minutes: f64,
}

impl NormalizedViewingRecord {
    /// Derive the date and duration fields from a raw record.
    pub fn from_record(record: ViewingRecord) -> Result<Self, NormalizeError> {
        let duration_minutes = parse_duration_minutes(&record.duration)?;
        let start_date = record.start_time.date();
        Ok(Self {
            month_begin: month_begin(start_date),
            start_date,
            duration_minutes,
            record,
        })
    }

    pub fn title(&self) -> &str {
        &self.record.title
    }

    pub fn device_type(&self) -> &str {
        &self.record.device_type
    }

    pub fn profile_name(&self) -> &str {
        &self.record.profile_name
    }

    pub fn is_trailer(&self) -> bool {
        self.record.is_trailer()
    }

    /// Year of the month-begin date, the key the dashboard filters on.
    pub fn year(&self) -> i32 {
        self.month_begin.year()
    }
}
