//! Test utilities and shared fixtures for the viewstat workspace.
//!
//! Available to other crates through the `testing` feature.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Viewing-history CSV fixtures in the Netflix export layout.
pub mod history_fixtures {
    use std::path::PathBuf;

    /// Header of a Netflix `ViewingActivity.csv` export.
    pub const HEADER: &str = "Profile Name,Start Time,Duration,Attributes,Title,Supplemental Video Type,Device Type,Bookmark,Latest Bookmark,Country";

    /// One export row.
    #[derive(Debug, Clone)]
    pub struct Row {
        pub profile: String,
        pub start_time: String,
        pub duration: String,
        pub title: String,
        pub supplemental: String,
        pub device: String,
    }

    impl Row {
        pub fn new(profile: &str, start_time: &str, duration: &str, title: &str, device: &str) -> Self {
            Self {
                profile: profile.to_string(),
                start_time: start_time.to_string(),
                duration: duration.to_string(),
                title: title.to_string(),
                supplemental: String::new(),
                device: device.to_string(),
            }
        }

        pub fn trailer(mut self) -> Self {
            self.supplemental = "TRAILER".to_string();
            self
        }

        /// Render as a CSV line, quoting every free-text field.
        pub fn to_csv_line(&self) -> String {
            format!(
                "\"{}\",{},{},,\"{}\",{},\"{}\",{},{},US (United States)",
                self.profile.replace('"', "\"\""),
                self.start_time,
                self.duration,
                self.title.replace('"', "\"\""),
                self.supplemental,
                self.device.replace('"', "\"\""),
                self.duration,
                self.duration,
            )
        }
    }

    /// Build a full CSV document from rows.
    pub fn csv_from_rows(rows: &[Row]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for row in rows {
            out.push_str(&row.to_csv_line());
            out.push('\n');
        }
        out
    }

    /// A small two-year export with trailers and several devices.
    pub fn sample_rows() -> Vec<Row> {
        vec![
            Row::new("Alex", "2021-03-15 21:04:11", "0:45:00", "Dark: Season 1: Secrets (Episode 1)", "Samsung TV"),
            Row::new("Alex", "2021-03-14 20:00:00", "0:50:00", "Dark: Season 1: Lies (Episode 2)", "Samsung TV"),
            Row::new("Alex", "2021-03-01 08:30:00", "0:00:30", "Dark: Season 2 (Trailer)", "iPhone").trailer(),
            Row::new("Sam", "2021-02-20 19:15:00", "1:30:00", "Roma", "Chrome PC (Cadmium)"),
            Row::new("Sam", "2021-02-20 22:00:00", "0:20:00", "The Crown: Season 1: Wolferton Splash (Episode 1)", "iPhone"),
            Row::new("Alex", "2020-12-31 23:10:00", "0:25:00", "The Office (U.S.): Season 2: The Dundies (Episode 1)", "Samsung TV"),
            Row::new("Alex", "2020-12-01 10:00:00", "0:05:00", "The Office (U.S.): Season 2: Sexual Harassment (Episode 2)", "iPhone"),
        ]
    }

    /// `sample_rows` as CSV text.
    pub fn sample_csv() -> String {
        csv_from_rows(&sample_rows())
    }

    /// Write CSV text into `dir` and return the path.
    pub fn write_csv(dir: &tempfile::TempDir, contents: &str) -> PathBuf {
        let path = dir.path().join("ViewingActivity.csv");
        std::fs::write(&path, contents).expect("Failed to write CSV fixture");
        path
    }
}

/// Configuration fixtures.
pub mod config_fixtures {
    /// A valid YAML configuration overriding a few defaults.
    pub fn minimal_config_yaml() -> &'static str {
        r#"
data:
  history_path: "datasets/ViewingActivity.csv"

output:
  dir: "charts"
  format: svg

tables:
  verbose: true
  display_all: false
  max_rows: 60
"#
    }
}

/// Property-based testing strategies.
pub mod property_testing {
    use super::history_fixtures::Row;
    use proptest::prelude::*;

    /// Device labels as they appear in Netflix exports.
    pub fn device_strategy() -> impl Strategy<Value = String> {
        prop::sample::select(vec![
            "Samsung TV",
            "iPhone",
            "Chrome PC (Cadmium)",
            "Apple TV 4",
            "Sony PS4",
        ])
        .prop_map(str::to_string)
    }

    /// `H:MM:SS` durations up to ten hours.
    pub fn duration_strategy() -> impl Strategy<Value = String> {
        (0u32..10, 0u32..60, 0u32..60).prop_map(|(h, m, s)| format!("{h}:{m:02}:{s:02}"))
    }

    /// Timestamps across 2019-2022.
    pub fn start_time_strategy() -> impl Strategy<Value = String> {
        (2019i32..=2022, 1u32..=12, 1u32..=28, 0u32..24, 0u32..60)
            .prop_map(|(y, mo, d, h, mi)| format!("{y}-{mo:02}-{d:02} {h:02}:{mi:02}:00"))
    }

    /// Titles with and without colon-separated suffixes.
    pub fn title_strategy() -> impl Strategy<Value = String> {
        ("[A-Za-z ]{1,12}", prop::option::of("[A-Za-z0-9 ]{0,12}")).prop_map(|(show, episode)| {
            match episode {
                Some(ep) => format!("{show}: {ep}"),
                None => show,
            }
        })
    }

    /// Complete export rows, roughly one in five a trailer.
    pub fn row_strategy() -> impl Strategy<Value = Row> {
        (
            prop::sample::select(vec!["Alex", "Sam", "Kids"]),
            start_time_strategy(),
            duration_strategy(),
            title_strategy(),
            device_strategy(),
            prop::bool::weighted(0.2),
        )
            .prop_map(|(profile, start, duration, title, device, trailer)| {
                let row = Row::new(profile, &start, &duration, &title, &device);
                if trailer {
                    row.trailer()
                } else {
                    row
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_multiple_calls() {
        init_test_logging();
        init_test_logging();
    }

    #[test]
    fn test_assert_approx_eq() {
        assert_approx_eq(1.0, 1.0001, 0.001);
        assert_approx_eq(1.0, 0.9999, 0.001);
    }

    #[test]
    #[should_panic]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq(1.0, 1.1, 0.05);
    }

    #[test]
    fn test_sample_csv_shape() {
        let csv = history_fixtures::sample_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], history_fixtures::HEADER);
        assert_eq!(lines.len(), history_fixtures::sample_rows().len() + 1);
        assert!(lines.iter().any(|l| l.contains("TRAILER")));
    }
}
