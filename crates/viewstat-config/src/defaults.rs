//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            output: OutputConfig::default(),
            charts: ChartsConfig::default(),
            tables: TablesConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from("datasets").join("ViewingActivity.csv"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("charts"),
            format: ImageFormat::Png,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            usage_by_date: ChartSize {
                width: 1600,
                height: 900,
            },
            monthly_usage: ChartSize {
                width: 1200,
                height: 800,
            },
            background_color: "#FFFFFF".to_string(),
            palette: PaletteConfig::Set3,
            font_family: "sans-serif".to_string(),
            title_font_size: 24,
            show_grid: true,
        }
    }
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            display_all: false,
            max_rows: 60,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: PathBuf::from("logs").join("viewstat.log"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chart_sizes() {
        let charts = ChartsConfig::default();
        assert_eq!((charts.usage_by_date.width, charts.usage_by_date.height), (1600, 900));
        assert_eq!((charts.monthly_usage.width, charts.monthly_usage.height), (1200, 800));
        assert_eq!(charts.palette, PaletteConfig::Set3);
    }

    #[test]
    fn test_default_tables_are_quiet() {
        let tables = TablesConfig::default();
        assert!(!tables.verbose);
        assert!(!tables.display_all);
        assert_eq!(tables.max_rows, 60);
    }
}
