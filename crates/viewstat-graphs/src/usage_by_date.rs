//! "Device Usage by Date" line chart.

use crate::palette::{Colorizer, Palette};
use crate::types::{DateAxis, Figure, FigureStyle, Series, SeriesKind};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use viewstat_common::Result;
use viewstat_config::{ChartSize, ChartsConfig};
use viewstat_history::{distinct_devices, NormalizedViewingRecord};

pub const TITLE: &str = "Device Usage by Date";
/// File name, without extension, used when writing the chart.
pub const FILE_STEM: &str = "device_usage_by_date";
pub const Y_LABEL: &str = "Minutes";
pub const DEFAULT_SIZE: ChartSize = ChartSize {
    width: 1600,
    height: 900,
};

/// One line per device, with a point for every viewing at its start date.
#[derive(Debug, Clone)]
pub struct UsageByDateChart {
    pub size: ChartSize,
    pub style: FigureStyle,
    pub colorizer: Colorizer,
}

impl Default for UsageByDateChart {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            style: FigureStyle::default(),
            colorizer: Colorizer::default(),
        }
    }
}

impl UsageByDateChart {
    pub fn from_config(config: &ChartsConfig) -> Result<Self> {
        Ok(Self {
            size: config.usage_by_date,
            style: FigureStyle::from_config(config)?,
            colorizer: Colorizer::new(Palette::from_config(&config.palette)?),
        })
    }

    /// Build the figure. Devices are ordered by name, points by date.
    /// Viewings on the same day stay separate points, in input order.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn build(&self, records: &[NormalizedViewingRecord]) -> Figure {
        let colors = self.colorizer.assign(&distinct_devices(records));

        let mut by_device: BTreeMap<&str, Vec<(NaiveDate, f64)>> = BTreeMap::new();
        for record in records {
            by_device
                .entry(record.device_type())
                .or_default()
                .push((record.start_date, record.duration_minutes));
        }

        let series: Vec<Series> = by_device
            .into_iter()
            .map(|(device, mut points)| {
                points.sort_by_key(|&(date, _)| date);
                Series {
                    label: device.to_string(),
                    color: colors.color_for(device),
                    kind: SeriesKind::Line,
                    points,
                }
            })
            .collect();

        debug!("Built usage-by-date figure with {} series", series.len());
        Figure {
            title: TITLE.to_string(),
            x_label: "Start Date".to_string(),
            y_label: Y_LABEL.to_string(),
            width: self.size.width,
            height: self.size.height,
            x_axis: DateAxis::Day,
            style: self.style.clone(),
            series,
        }
    }
}

/// Build the usage-by-date figure with default size and palette.
pub fn plot_usage_by_date_and_device(records: &[NormalizedViewingRecord]) -> Figure {
    UsageByDateChart::default().build(records)
}
