//! "Monthly Usage by Device" point chart.

use crate::palette::{Colorizer, Palette};
use crate::types::{DateAxis, Figure, FigureStyle, Series, SeriesKind};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use viewstat_common::Result;
use viewstat_config::{ChartSize, ChartsConfig};
use viewstat_history::{distinct_devices, sum_usage_by_month_and_device, NormalizedViewingRecord};

pub const TITLE: &str = "Monthly Usage by Device";
/// File name, without extension, used when writing the chart.
pub const FILE_STEM: &str = "monthly_usage_by_device";
pub const Y_LABEL: &str = "Hours";
pub const DEFAULT_SIZE: ChartSize = ChartSize {
    width: 1200,
    height: 800,
};

/// One point per (month, device) with hours watched. Missing months stay missing.
#[derive(Debug, Clone)]
pub struct MonthlyUsageChart {
    pub size: ChartSize,
    pub style: FigureStyle,
    pub colorizer: Colorizer,
}

impl Default for MonthlyUsageChart {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            style: FigureStyle::default(),
            colorizer: Colorizer::default(),
        }
    }
}

impl MonthlyUsageChart {
    pub fn from_config(config: &ChartsConfig) -> Result<Self> {
        Ok(Self {
            size: config.monthly_usage,
            style: FigureStyle::from_config(config)?,
            colorizer: Colorizer::new(Palette::from_config(&config.palette)?),
        })
    }

    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(&self, records: &[NormalizedViewingRecord]) -> Figure {
        let colors = self.colorizer.assign(&distinct_devices(records));

        // BTreeMap keeps the legend alphabetical.
        let mut by_device: BTreeMap<String, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for row in sum_usage_by_month_and_device(records) {
            by_device
                .entry(row.device_type)
                .or_default()
                .push((row.month_begin, row.duration_minutes / 60.0));
        }

        let series: Vec<Series> = by_device
            .into_iter()
            .map(|(device, points)| Series {
                color: colors.color_for(&device),
                label: device,
                kind: SeriesKind::Points,
                points,
            })
            .collect();

        debug!("Built monthly-usage figure with {} series", series.len());
        Figure {
            title: TITLE.to_string(),
            x_label: "Month".to_string(),
            y_label: Y_LABEL.to_string(),
            width: self.size.width,
            height: self.size.height,
            x_axis: DateAxis::Month,
            style: self.style.clone(),
            series,
        }
    }
}

/// Build the monthly-usage figure with default size and palette.
pub fn plot_monthly_usage_by_device(records: &[NormalizedViewingRecord]) -> Figure {
    MonthlyUsageChart::default().build(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewstat_history::HistoryLoader;

    const CSV: &str = "\
Profile Name,Start Time,Duration,Title,Supplemental Video Type,Device Type
Alex,2021-01-06 10:00:00,1:00:00,A,,TV
Alex,2021-01-20 10:00:00,0:30:00,A,,TV
Alex,2021-03-05 11:00:00,0:15:00,B,,TV
Sam,2021-01-07 11:00:00,0:45:00,B,,Phone
Sam,2021-02-01 09:00:00,2:00:00,C,,Apple TV
";

    fn records() -> Vec<NormalizedViewingRecord> {
        HistoryLoader::new().load_reader(CSV.as_bytes()).unwrap()
    }

    fn month(m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2021, m, 1).unwrap()
    }

    #[test]
    fn test_points_in_hours() {
        let figure = plot_monthly_usage_by_device(&records());
        let tv = figure.series.iter().find(|s| s.label == "TV").unwrap();

        assert_eq!(tv.points, vec![(month(1), 1.5), (month(3), 0.25)]);
        assert_eq!(figure.y_label, "Hours");
        assert_eq!(figure.title, TITLE);
        assert_eq!((figure.width, figure.height), (1200, 800));
    }

    #[test]
    fn test_no_zero_fill() {
        let figure = plot_monthly_usage_by_device(&records());
        let tv = figure.series.iter().find(|s| s.label == "TV").unwrap();
        assert!(!tv.points.iter().any(|&(m, _)| m == month(2)));
        assert_eq!(figure.point_count(), 4);
    }

    #[test]
    fn test_legend_alphabetical_and_unique() {
        let figure = plot_monthly_usage_by_device(&records());
        let legend: Vec<String> = figure.legend().into_iter().map(|e| e.label).collect();
        assert_eq!(legend, vec!["Apple TV", "Phone", "TV"]);
    }

    #[test]
    fn test_colors_from_colorizer() {
        let figure = plot_monthly_usage_by_device(&records());
        let expected = Colorizer::default().assign(&["TV", "Phone", "Apple TV"]);

        for series in &figure.series {
            assert_eq!(Some(series.color), expected.get(&series.label));
            assert_eq!(series.kind, SeriesKind::Points);
        }
    }

    #[test]
    fn test_deterministic() {
        let records = records();
        assert_eq!(
            plot_monthly_usage_by_device(&records),
            plot_monthly_usage_by_device(&records)
        );
    }
}
