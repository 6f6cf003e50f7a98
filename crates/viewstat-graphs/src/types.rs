//! Figure model shared by the chart builders, the file renderer, and the dashboard.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use viewstat_common::{month_label, Result, ViewstatError};
use viewstat_config::ChartsConfig;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLACK: Rgb = Rgb(0, 0, 0);

    /// Parse a `#RRGGBB` string.
    pub fn from_hex(color: &str) -> Result<Self> {
        let invalid = || ViewstatError::validation(format!("Invalid hex color '{color}'"));
        let hex = color.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for plotters::style::RGBColor {
    fn from(color: Rgb) -> Self {
        plotters::style::RGBColor(color.0, color.1, color.2)
    }
}

/// An RGB color with an 8-bit alpha channel. Device colors are always RGBA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const fn opaque(color: Rgb) -> Self {
        Self(color.0, color.1, color.2, u8::MAX)
    }

    pub fn rgb(self) -> Rgb {
        Rgb(self.0, self.1, self.2)
    }

    /// Alpha in `0.0..=1.0`.
    pub fn alpha(self) -> f64 {
        f64::from(self.3) / f64::from(u8::MAX)
    }
}

impl From<Rgb> for Rgba {
    fn from(color: Rgb) -> Self {
        Self::opaque(color)
    }
}

impl From<Rgba> for plotters::style::RGBAColor {
    fn from(color: Rgba) -> Self {
        plotters::style::RGBAColor(color.0, color.1, color.2, color.alpha())
    }
}

/// How a series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesKind {
    /// Connected line with a marker on every point.
    Line,
    /// Unconnected markers.
    Points,
}

/// How x-axis ticks are labeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateAxis {
    /// `2021-03-15`
    Day,
    /// `Mar 2021`
    Month,
}

impl DateAxis {
    pub fn label(self, date: NaiveDate) -> String {
        match self {
            Self::Day => date.format("%Y-%m-%d").to_string(),
            Self::Month => month_label(date),
        }
    }
}

/// Continuous x value of a date: days since 0001-01-01.
pub fn date_to_x(date: NaiveDate) -> f64 {
    f64::from(date.num_days_from_ce())
}

/// Inverse of [`date_to_x`], rounding to the nearest day.
pub fn x_to_date(x: f64) -> Option<NaiveDate> {
    if !x.is_finite() || x.abs() > f64::from(i32::MAX) {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(x.round() as i32)
}

/// One labeled data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub label: String,
    pub color: Rgba,
    pub kind: SeriesKind,
    /// Sorted by date ascending.
    pub points: Vec<(NaiveDate, f64)>,
}

impl Series {
    /// Points as `(x, y)` pairs on the continuous date axis.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.points
            .iter()
            .map(|&(date, y)| (date_to_x(date), y))
            .collect()
    }
}

/// One legend row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
}

/// Colors, fonts, and grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureStyle {
    pub background: Rgb,
    pub font_family: String,
    pub title_font_size: u32,
    pub show_grid: bool,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            font_family: "sans-serif".to_string(),
            title_font_size: 24,
            show_grid: true,
        }
    }
}

impl FigureStyle {
    pub fn from_config(config: &ChartsConfig) -> Result<Self> {
        Ok(Self {
            background: Rgb::from_hex(&config.background_color)?,
            font_family: config.font_family.clone(),
            title_font_size: config.title_font_size,
            show_grid: config.show_grid,
        })
    }
}

/// A fully built chart, independent of any drawing backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub width: u32,
    pub height: u32,
    pub x_axis: DateAxis,
    pub style: FigureStyle,
    pub series: Vec<Series>,
}

impl Figure {
    /// True when no series has a point.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// Legend rows in series order, each label once.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let mut entries: Vec<LegendEntry> = Vec::new();
        for series in &self.series {
            if !entries.iter().any(|e| e.label == series.label) {
                entries.push(LegendEntry {
                    label: series.label.clone(),
                    color: series.color,
                });
            }
        }
        entries
    }

    /// X range covering every point, widened by a day on each side.
    pub fn x_bounds(&self) -> (f64, f64) {
        let (min, max) = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(date, _)| date_to_x(date)))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(x), hi.max(x)));
        if min > max {
            return (0.0, 1.0);
        }
        (min - 1.0, max + 1.0)
    }

    /// Y range from zero to just above the largest value.
    pub fn y_bounds(&self) -> (f64, f64) {
        let max = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y))
            .fold(0.0f64, f64::max);
        if max <= 0.0 {
            (0.0, 1.0)
        } else {
            (0.0, max * 1.1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn figure(series: Vec<Series>) -> Figure {
        Figure {
            title: "Test".to_string(),
            x_label: "Date".to_string(),
            y_label: "Minutes".to_string(),
            width: 800,
            height: 600,
            x_axis: DateAxis::Day,
            style: FigureStyle::default(),
            series,
        }
    }

    fn series(label: &str, points: Vec<(NaiveDate, f64)>) -> Series {
        Series {
            label: label.to_string(),
            color: Rgba::opaque(Rgb::BLACK),
            kind: SeriesKind::Points,
            points,
        }
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(Rgb::from_hex("#8dd3c7").unwrap(), Rgb(0x8d, 0xd3, 0xc7));
        assert_eq!(Rgb::from_hex("#FFFFFF").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb(255, 0, 16).to_hex(), "#ff0010");

        for bad in ["8dd3c7", "#8dd3c", "#zzzzzz", "#8dd3c7ff", "#ééé"] {
            assert!(Rgb::from_hex(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_rgba() {
        let color = Rgba::opaque(Rgb(1, 2, 3));
        assert_eq!(color, Rgba(1, 2, 3, 255));
        assert_eq!(color.rgb(), Rgb(1, 2, 3));
        assert_eq!(color.alpha(), 1.0);
        assert_eq!(Rgba(0, 0, 0, 0).alpha(), 0.0);

        let plotted = plotters::style::RGBAColor::from(Rgba(10, 20, 30, 255));
        assert_eq!((plotted.0, plotted.1, plotted.2), (10, 20, 30));
        assert_eq!(plotted.3, 1.0);
    }

    #[test]
    fn test_date_axis_round_trip() {
        let d = date(2021, 3, 15);
        assert_eq!(x_to_date(date_to_x(d)), Some(d));
        assert_eq!(x_to_date(date_to_x(d) + 0.4), Some(d));
        assert_eq!(x_to_date(f64::NAN), None);
        assert_eq!(DateAxis::Day.label(d), "2021-03-15");
        assert_eq!(DateAxis::Month.label(date(2021, 3, 1)), "Mar 2021");
    }

    #[test]
    fn test_bounds() {
        let fig = figure(vec![
            series("TV", vec![(date(2021, 1, 1), 10.0), (date(2021, 1, 5), 40.0)]),
            series("Phone", vec![(date(2021, 1, 3), 20.0)]),
        ]);
        let (x_min, x_max) = fig.x_bounds();
        assert_eq!(x_min, date_to_x(date(2021, 1, 1)) - 1.0);
        assert_eq!(x_max, date_to_x(date(2021, 1, 5)) + 1.0);
        let (y_min, y_max) = fig.y_bounds();
        assert_eq!(y_min, 0.0);
        assert!((y_max - 44.0).abs() < 1e-9);
        assert_eq!(fig.point_count(), 3);
    }

    #[test]
    fn test_empty_figure() {
        let fig = figure(vec![series("TV", vec![])]);
        assert!(fig.is_empty());
        assert_eq!(fig.x_bounds(), (0.0, 1.0));
        assert_eq!(fig.y_bounds(), (0.0, 1.0));
    }

    #[test]
    fn test_legend_dedup() {
        let fig = figure(vec![
            series("Phone", vec![(date(2021, 1, 1), 1.0)]),
            series("TV", vec![(date(2021, 1, 1), 1.0)]),
            series("Phone", vec![(date(2021, 2, 1), 1.0)]),
        ]);
        let labels: Vec<String> = fig.legend().into_iter().map(|e| e.label).collect();
        assert_eq!(labels, vec!["Phone", "TV"]);
    }
}
