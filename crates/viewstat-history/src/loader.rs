//! CSV loading of the Netflix `ViewingActivity.csv` export.

use crate::normalize::{parse_start_time, NormalizeError};
use crate::record::{NormalizedViewingRecord, ViewingRecord};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};
use viewstat_common::{Result, ViewstatError};

/// Columns every export must provide. Others are ignored.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Start Time",
    "Duration",
    "Device Type",
    "Title",
    "Profile Name",
    "Supplemental Video Type",
];

/// One CSV row before any field is interpreted.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "Duration")]
    duration: String,
    #[serde(rename = "Device Type")]
    device_type: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Profile Name")]
    profile_name: String,
    #[serde(rename = "Supplemental Video Type", default)]
    supplemental_video_type: String,
}

/// Load and normalize a viewing-history file.
pub fn load_viewing_activity(path: impl AsRef<Path>) -> Result<Vec<NormalizedViewingRecord>> {
    HistoryLoader::new().load(path)
}

/// Viewing-history loader. Loading is strict: the first malformed row fails the whole load.
#[derive(Debug, Default, Clone)]
pub struct HistoryLoader;

impl HistoryLoader {
    pub fn new() -> Self {
        Self
    }

    /// Load and normalize the file at `path`.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<NormalizedViewingRecord>> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ViewstatError::file_not_found(path));
        }

        let file = File::open(path)?;
        let records = self.load_reader(file)?;
        info!("Loaded {} viewing records from {}", records.len(), path.display());
        Ok(records)
    }

    /// Load and normalize CSV text from any reader.
    pub fn load_reader<R: Read>(&self, reader: R) -> Result<Vec<NormalizedViewingRecord>> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| ViewstatError::parse_with_source("Unreadable header row", Some(1), e))?
            .clone();
        Self::check_columns(&headers)?;

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result.map_err(|e| {
                let line = e.position().map(|p| p.line());
                ViewstatError::parse_with_source("Malformed CSV row", line, e)
            })?;
            records.push(Self::normalize_row(&row, &headers)?);
        }

        debug!("Normalized {} rows", records.len());
        Ok(records)
    }

    fn check_columns(headers: &StringRecord) -> Result<()> {
        match REQUIRED_COLUMNS
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            Some(missing) => Err(ViewstatError::missing_column(*missing)),
            None => Ok(()),
        }
    }

    fn normalize_row(row: &StringRecord, headers: &StringRecord) -> Result<NormalizedViewingRecord> {
        let line = row.position().map(|p| p.line());

        let raw: RawRow = row
            .deserialize(Some(headers))
            .map_err(|e| ViewstatError::parse_with_source("Malformed CSV row", line, e))?;

        let to_parse_error = |e: NormalizeError| ViewstatError::Parse {
            message: e.to_string(),
            line,
            source: None,
        };

        let record = ViewingRecord {
            start_time: parse_start_time(&raw.start_time).map_err(to_parse_error)?,
            title: raw.title,
            device_type: raw.device_type,
            duration: raw.duration,
            profile_name: raw.profile_name,
            supplemental_video_type: raw.supplemental_video_type,
        };

        NormalizedViewingRecord::from_record(record).map_err(to_parse_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const HEADER: &str = "Profile Name,Start Time,Duration,Title,Supplemental Video Type,Device Type";

    fn load_str(csv: &str) -> Result<Vec<NormalizedViewingRecord>> {
        HistoryLoader::new().load_reader(csv.as_bytes())
    }

    #[test]
    fn test_loads_minimal_columns() {
        let csv = format!(
            "{HEADER}\nAlex,2021-01-05 20:00:00,0:10:00,\"Show: Episode 1\",,TV\n"
        );
        let records = load_str(&csv).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title(), "Show: Episode 1");
        assert_eq!(records[0].device_type(), "TV");
        assert_eq!(records[0].duration_minutes, 10.0);
        assert_eq!(records[0].start_date, NaiveDate::from_ymd_opt(2021, 1, 5).unwrap());
        assert_eq!(records[0].record.supplemental_video_type, "");
    }

    #[test]
    fn test_header_only_yields_no_records() {
        assert!(load_str(&format!("{HEADER}\n")).unwrap().is_empty());
    }

    #[test]
    fn test_missing_column() {
        let csv = "Profile Name,Start Time,Duration,Title,Device Type\nAlex,2021-01-05 20:00:00,0:10:00,X,TV\n";
        let err = load_str(csv).unwrap_err();
        assert!(matches!(
            err,
            ViewstatError::MissingColumn { ref column } if column == "Supplemental Video Type"
        ));
    }

    #[test]
    fn test_bad_duration_reports_line() {
        let csv = format!(
            "{HEADER}\nAlex,2021-01-05 20:00:00,0:10:00,A,,TV\nAlex,2021-01-06 20:00:00,ten,B,,TV\n"
        );
        let err = load_str(&csv).unwrap_err();
        match err {
            ViewstatError::Parse { line, message, .. } => {
                assert_eq!(line, Some(3));
                assert!(message.contains("ten"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_timestamp_fails_whole_load() {
        let csv = format!(
            "{HEADER}\nAlex,not a time,0:10:00,A,,TV\nAlex,2021-01-06 20:00:00,0:10:00,B,,TV\n"
        );
        assert!(matches!(load_str(&csv), Err(ViewstatError::Parse { .. })));
    }

    #[test]
    fn test_ragged_row_is_parse_error() {
        let csv = format!("{HEADER}\nAlex,2021-01-05 20:00:00,0:10:00\n");
        assert!(matches!(load_str(&csv), Err(ViewstatError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let err = load_viewing_activity("/no/such/ViewingActivity.csv").unwrap_err();
        assert!(matches!(err, ViewstatError::FileNotFound { .. }));
    }
}
