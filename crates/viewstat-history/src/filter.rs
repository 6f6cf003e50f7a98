//! Year-based selection of records.

use crate::record::NormalizedViewingRecord;

/// Distinct month-begin years present in `records`, newest first.
pub fn available_years(records: &[NormalizedViewingRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().map(NormalizedViewingRecord::year).collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// Records whose month-begin year equals `year`, in their original order.
pub fn select_year(records: &[NormalizedViewingRecord], year: i32) -> Vec<NormalizedViewingRecord> {
    records
        .iter()
        .filter(|record| record.year() == year)
        .cloned()
        .collect()
}

/// Distinct device types in first-seen order.
pub fn distinct_devices(records: &[NormalizedViewingRecord]) -> Vec<String> {
    let mut devices: Vec<String> = Vec::new();
    for record in records {
        if !devices.iter().any(|d| d == record.device_type()) {
            devices.push(record.device_type().to_string());
        }
    }
    devices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::parse_start_time;
    use crate::record::ViewingRecord;

    fn record(start: &str, device: &str) -> NormalizedViewingRecord {
        NormalizedViewingRecord::from_record(ViewingRecord {
            start_time: parse_start_time(start).unwrap(),
            title: "Roma".to_string(),
            device_type: device.to_string(),
            duration: "0:10:00".to_string(),
            profile_name: "Alex".to_string(),
            supplemental_video_type: String::new(),
        })
        .unwrap()
    }

    #[test]
    fn test_available_years_newest_first() {
        let records = vec![
            record("2020-05-01 10:00:00", "TV"),
            record("2021-01-01 00:10:00", "TV"),
            record("2019-12-31 23:00:00", "TV"),
            record("2021-07-04 10:00:00", "TV"),
        ];
        assert_eq!(available_years(&records), vec![2021, 2020, 2019]);
    }

    #[test]
    fn test_select_year_preserves_order() {
        let records = vec![
            record("2021-03-01 10:00:00", "TV"),
            record("2020-12-31 23:59:00", "Phone"),
            record("2021-01-01 00:00:00", "Phone"),
        ];
        let selected = select_year(&records, 2021);

        assert_eq!(selected.len(), 2);
        assert_eq!(selected[0], records[0]);
        assert_eq!(selected[1], records[2]);
        assert!(select_year(&records, 1999).is_empty());
    }

    #[test]
    fn test_distinct_devices_first_seen() {
        let records = vec![
            record("2021-03-01 10:00:00", "TV"),
            record("2021-03-02 10:00:00", "Phone"),
            record("2021-03-03 10:00:00", "TV"),
            record("2021-03-04 10:00:00", "Laptop"),
        ];
        assert_eq!(distinct_devices(&records), vec!["TV", "Phone", "Laptop"]);
    }
}
