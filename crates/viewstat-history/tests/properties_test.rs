//! Property tests for the aggregation invariants.

use proptest::prelude::*;
use viewstat_common::test_utils::history_fixtures::{csv_from_rows, Row};
use viewstat_common::test_utils::property_testing::{row_strategy, title_strategy};
use viewstat_history::*;

fn load(rows: &[Row]) -> Vec<NormalizedViewingRecord> {
    HistoryLoader::new()
        .load_reader(csv_from_rows(rows).as_bytes())
        .expect("generated rows should load")
}

proptest! {
    #[test]
    fn prop_usage_conserves_duration(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let records = load(&rows);
        let input_total: f64 = records.iter().map(|r| r.duration_minutes).sum();
        let summary = sum_usage_by_date_and_device(&records);

        prop_assert!((summary.total_minutes() - input_total).abs() < 1e-6);
    }

    #[test]
    fn prop_usage_sorted_by_date_descending(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let summary = sum_usage_by_date_and_device(&load(&rows));

        prop_assert!(summary
            .rows()
            .windows(2)
            .all(|pair| pair[0].start_date >= pair[1].start_date));
    }

    #[test]
    fn prop_watch_counts_exclude_trailers(rows in prop::collection::vec(row_strategy(), 0..60)) {
        let records = load(&rows);
        let non_trailers = records.iter().filter(|r| !r.is_trailer()).count() as u64;
        let summary = count_show_watches(&records);

        prop_assert_eq!(summary.total_count(), non_trailers);
        prop_assert!(summary.rows().windows(2).all(|pair| pair[0].count >= pair[1].count));
        prop_assert!(summary.rows().iter().all(|r| !r.short_title.contains(':')));
    }

    #[test]
    fn prop_short_title_is_idempotent(title in title_strategy()) {
        let once = short_title(&title);
        prop_assert_eq!(short_title(once), once);
    }

    #[test]
    fn prop_years_cover_every_record(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let records = load(&rows);
        let years = available_years(&records);
        let selected: usize = years.iter().map(|&y| select_year(&records, y).len()).sum();

        prop_assert_eq!(selected, records.len());
        prop_assert!(years.windows(2).all(|pair| pair[0] > pair[1]));
    }
}
