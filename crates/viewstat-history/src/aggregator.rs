//! Grouping of normalized records into summary tables.

use crate::record::NormalizedViewingRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Total minutes watched on one device on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRow {
    pub start_date: NaiveDate,
    pub device_type: String,
    pub duration_minutes: f64,
}

/// Usage by (start date, device type), newest date first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UsageSummary {
    rows: Vec<UsageRow>,
}

impl UsageSummary {
    pub fn rows(&self) -> &[UsageRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Minutes for one (date, device) pair, if any were recorded.
    pub fn minutes_for(&self, date: NaiveDate, device_type: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.start_date == date && row.device_type == device_type)
            .map(|row| row.duration_minutes)
    }

    pub fn total_minutes(&self) -> f64 {
        self.rows.iter().map(|row| row.duration_minutes).sum()
    }
}

/// Number of watch events for one show on one profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchCountRow {
    pub short_title: String,
    pub profile_name: String,
    pub count: u64,
}

/// Watch counts by (short title, profile), most watched first. Trailers excluded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WatchCountSummary {
    rows: Vec<WatchCountRow>,
}

impl WatchCountSummary {
    pub fn rows(&self) -> &[WatchCountRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn total_count(&self) -> u64 {
        self.rows.iter().map(|row| row.count).sum()
    }
}

/// Total minutes on one device in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyUsageRow {
    pub month_begin: NaiveDate,
    pub device_type: String,
    pub duration_minutes: f64,
}

/// Series name with the episode/season suffix removed: everything from the first colon on.
pub fn short_title(title: &str) -> &str {
    title.split(':').next().unwrap_or(title)
}

/// Sum watched minutes per (start date, device type), sorted by date descending.
#[instrument(skip(records), fields(records = records.len()))]
pub fn sum_usage_by_date_and_device(records: &[NormalizedViewingRecord]) -> UsageSummary {
    let mut totals: HashMap<(NaiveDate, &str), f64> = HashMap::new();
    for record in records {
        *totals
            .entry((record.start_date, record.device_type()))
            .or_insert(0.0) += record.duration_minutes;
    }

    let mut rows: Vec<UsageRow> = totals
        .into_iter()
        .map(|((start_date, device_type), duration_minutes)| UsageRow {
            start_date,
            device_type: device_type.to_string(),
            duration_minutes,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.start_date
            .cmp(&a.start_date)
            .then_with(|| a.device_type.cmp(&b.device_type))
    });

    debug!("Aggregated {} usage rows", rows.len());
    UsageSummary { rows }
}

/// Count non-trailer viewings per (short title, profile), sorted by count descending.
#[instrument(skip(records), fields(records = records.len()))]
pub fn count_show_watches(records: &[NormalizedViewingRecord]) -> WatchCountSummary {
    let mut counts: HashMap<(&str, &str), u64> = HashMap::new();
    for record in records.iter().filter(|r| !r.is_trailer()) {
        *counts
            .entry((short_title(record.title()), record.profile_name()))
            .or_insert(0) += 1;
    }

    let mut rows: Vec<WatchCountRow> = counts
        .into_iter()
        .map(|((short_title, profile_name), count)| WatchCountRow {
            short_title: short_title.to_string(),
            profile_name: profile_name.to_string(),
            count,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.short_title.cmp(&b.short_title))
            .then_with(|| a.profile_name.cmp(&b.profile_name))
    });

    debug!("Counted watches for {} show/profile pairs", rows.len());
    WatchCountSummary { rows }
}

/// Sum watched minutes per (month begin, device type), sorted by month then device.
///
/// Months without records for a device produce no row.
#[instrument(skip(records), fields(records = records.len()))]
pub fn sum_usage_by_month_and_device(records: &[NormalizedViewingRecord]) -> Vec<MonthlyUsageRow> {
    let mut totals: HashMap<(NaiveDate, &str), f64> = HashMap::new();
    for record in records {
        *totals
            .entry((record.month_begin, record.device_type()))
            .or_insert(0.0) += record.duration_minutes;
    }

    let mut rows: Vec<MonthlyUsageRow> = totals
        .into_iter()
        .map(|((month_begin, device_type), duration_minutes)| MonthlyUsageRow {
            month_begin,
            device_type: device_type.to_string(),
            duration_minutes,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.month_begin
            .cmp(&b.month_begin)
            .then_with(|| a.device_type.cmp(&b.device_type))
    });
    rows
}
