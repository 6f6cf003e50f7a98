//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for viewstat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input data configuration.
    pub data: DataConfig,
    /// Chart file output configuration.
    pub output: OutputConfig,
    /// Chart appearance configuration.
    pub charts: ChartsConfig,
    /// Table printing configuration.
    pub tables: TablesConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Input data configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the Netflix `ViewingActivity.csv` export.
    pub history_path: PathBuf,
}

/// Image format for rendered charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG bitmap.
    Png,
    /// SVG vector image.
    Svg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// Chart file output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory chart files are written into.
    pub dir: PathBuf,
    /// Image format.
    pub format: ImageFormat,
}

/// Pixel dimensions of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Qualitative palette used to color devices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteConfig {
    /// The 12-color "Set3" palette.
    Set3,
    /// The 10-color Tableau palette.
    Tableau,
    /// A high-contrast 8-color palette.
    Vibrant,
    /// User supplied `#RRGGBB` colors.
    Custom(Vec<String>),
}

/// Chart appearance configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Size of the device-usage-by-date chart.
    pub usage_by_date: ChartSize,
    /// Size of the monthly-usage-by-device chart.
    pub monthly_usage: ChartSize,
    /// Background color (hex format).
    pub background_color: String,
    /// Device palette.
    pub palette: PaletteConfig,
    /// Font family for captions and labels.
    pub font_family: String,
    /// Caption font size.
    pub title_font_size: u32,
    /// Whether to draw grid lines.
    pub show_grid: bool,
}

/// Table printing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Print summary tables when they are computed.
    pub verbose: bool,
    /// Print every row instead of a head/tail excerpt.
    pub display_all: bool,
    /// Row count above which excerpts are shown.
    pub max_rows: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter, e.g. `info` or `viewstat_history=debug`.
    pub level: String,
    /// Emit JSON lines.
    pub json: bool,
    /// Log file used while the dashboard owns the terminal.
    pub file: PathBuf,
}
