//! Integration tests for viewstat-history: load a Netflix export from disk and summarize it.

use chrono::NaiveDate;
use tempfile::TempDir;
use viewstat_common::test_utils::history_fixtures::{csv_from_rows, sample_csv, write_csv, Row};
use viewstat_common::test_utils::{assert_approx_eq, init_test_logging};
use viewstat_common::ViewstatError;
use viewstat_history::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_load_full_export() {
    init_test_logging();
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, &sample_csv());

    let records = load_viewing_activity(&path).unwrap();

    assert_eq!(records.len(), 7);
    assert_eq!(records[0].profile_name(), "Alex");
    assert_eq!(records[0].month_begin, date(2021, 3, 1));
    assert_eq!(records.iter().filter(|r| r.is_trailer()).count(), 1);
}

#[test]
fn test_years_and_selection() {
    let dir = TempDir::new().unwrap();
    let records = load_viewing_activity(write_csv(&dir, &sample_csv())).unwrap();

    assert_eq!(available_years(&records), vec![2021, 2020]);

    let year_2020 = select_year(&records, 2020);
    assert_eq!(year_2020.len(), 2);
    assert!(year_2020.iter().all(|r| r.year() == 2020));
}

#[test]
fn test_usage_summary_from_file() {
    let dir = TempDir::new().unwrap();
    let records = load_viewing_activity(write_csv(&dir, &sample_csv())).unwrap();
    let usage = sum_usage_by_date_and_device(&records);

    assert_eq!(usage.rows()[0].start_date, date(2021, 3, 15));
    assert_eq!(usage.minutes_for(date(2021, 2, 20), "Chrome PC (Cadmium)"), Some(90.0));
    assert_eq!(usage.minutes_for(date(2021, 2, 20), "iPhone"), Some(20.0));
    assert_approx_eq(usage.total_minutes(), 45.0 + 50.0 + 0.5 + 90.0 + 20.0 + 25.0 + 5.0, 1e-9);
}

#[test]
fn test_watch_counts_from_file() {
    let dir = TempDir::new().unwrap();
    let records = load_viewing_activity(write_csv(&dir, &sample_csv())).unwrap();
    let counts = count_show_watches(&records);

    assert_eq!(counts.total_count(), 6);
    let top = &counts.rows()[0];
    assert_eq!(top.count, 2);
    assert_eq!(top.short_title, "Dark");
    assert_eq!(top.profile_name, "Alex");
    assert!(counts.rows().iter().any(|r| r.short_title == "The Office (U.S.)" && r.count == 2));
}

#[test]
fn test_monthly_usage_from_file() {
    let dir = TempDir::new().unwrap();
    let records = load_viewing_activity(write_csv(&dir, &sample_csv())).unwrap();
    let monthly = sum_usage_by_month_and_device(&records);

    let december_tv = monthly
        .iter()
        .find(|row| row.month_begin == date(2020, 12, 1) && row.device_type == "Samsung TV")
        .unwrap();
    assert_eq!(december_tv.duration_minutes, 25.0);
    assert!(!monthly
        .iter()
        .any(|row| row.month_begin == date(2021, 1, 1)));
}

#[test]
fn test_bad_row_fails_load_with_line() {
    let dir = TempDir::new().unwrap();
    let rows = vec![
        Row::new("Alex", "2021-01-05 20:00:00", "0:10:00", "A", "TV"),
        Row::new("Alex", "2021-01-05 21:00:00", "0:10:00", "B", "TV"),
        Row::new("Alex", "2021-01-05 22:00:00", "forever", "C", "TV"),
    ];
    let path = write_csv(&dir, &csv_from_rows(&rows));

    let err = load_viewing_activity(path).unwrap_err();
    assert!(err.is_input_error());
    assert!(err.to_string().starts_with("Parse error at line 4"));
}

#[test]
fn test_missing_file_error() {
    let dir = TempDir::new().unwrap();
    let err = load_viewing_activity(dir.path().join("absent.csv")).unwrap_err();
    assert!(matches!(err, ViewstatError::FileNotFound { .. }));
}

#[test]
fn test_printed_report_is_truncated() {
    let rows: Vec<Row> = (1..=28)
        .flat_map(|day| {
            let start_a = format!("2021-02-{day:02} 10:00:00");
            let start_b = format!("2021-02-{day:02} 20:00:00");
            vec![
                Row::new("Alex", &start_a, "0:10:00", "Roma", "TV"),
                Row::new("Alex", &start_b, "0:10:00", "Roma", "Phone"),
            ]
        })
        .chain(std::iter::once(Row::new("Alex", "2021-03-01 10:00:00", "0:10:00", "Roma", "TV")))
        .collect();
    let records = HistoryLoader::new()
        .load_reader(csv_from_rows(&rows).as_bytes())
        .unwrap();
    let usage = sum_usage_by_date_and_device(&records);
    assert_eq!(usage.len(), 57);

    let truncated = TablePrinter::new(DisplayMode::Truncated, 10).format(&usage);
    assert!(truncated.contains("[57 rows x 4 columns]"));
    assert!(truncated.contains("Start Date"));
    assert!(truncated.contains("2021-03-01"));
    assert!(!truncated.contains("2021-02-15"));

    let full = TablePrinter::default().format(&usage);
    let dated = full.lines().filter(|line| line.contains("2021-0")).count();
    assert_eq!(dated, 57);
    assert!(!full.contains("rows x"));
}
