//! Runtime validation of loaded configuration.

use crate::schema::{ChartSize, Config, PaletteConfig};
use regex::Regex;
use std::sync::LazyLock;
use viewstat_common::{Result, ViewstatError};

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #ff0000)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

const MIN_CHART_PIXELS: u32 = 100;
const MAX_CHART_PIXELS: u32 = 8000;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting the first offending field.
    pub fn validate(config: &Config) -> Result<()> {
        if config.data.history_path.as_os_str().is_empty() {
            return Err(ViewstatError::validation_field(
                "History path cannot be empty",
                "data.history_path",
            ));
        }

        Self::validate_size(&config.charts.usage_by_date, "charts.usage_by_date")?;
        Self::validate_size(&config.charts.monthly_usage, "charts.monthly_usage")?;

        if !HEX_COLOR_REGEX.is_match(&config.charts.background_color) {
            return Err(ViewstatError::validation_field(
                format!(
                    "Background color must be a #RRGGBB hex color, got '{}'",
                    config.charts.background_color
                ),
                "charts.background_color",
            ));
        }

        if let PaletteConfig::Custom(colors) = &config.charts.palette {
            if colors.is_empty() {
                return Err(ViewstatError::validation_field(
                    "Custom palette needs at least one color",
                    "charts.palette",
                ));
            }
            if let Some(bad) = colors.iter().find(|c| !HEX_COLOR_REGEX.is_match(c)) {
                return Err(ViewstatError::validation_field(
                    format!("Palette color must be a #RRGGBB hex color, got '{bad}'"),
                    "charts.palette",
                ));
            }
        }

        if !(8..=96).contains(&config.charts.title_font_size) {
            return Err(ViewstatError::validation_field(
                "Title font size must be between 8 and 96",
                "charts.title_font_size",
            ));
        }

        if config.tables.max_rows < 10 {
            return Err(ViewstatError::validation_field(
                "max_rows must be at least 10",
                "tables.max_rows",
            ));
        }

        Ok(())
    }

    fn validate_size(size: &ChartSize, field: &str) -> Result<()> {
        let range = MIN_CHART_PIXELS..=MAX_CHART_PIXELS;
        if range.contains(&size.width) && range.contains(&size.height) {
            Ok(())
        } else {
            Err(ViewstatError::validation_field(
                format!(
                    "Chart size must be between {MIN_CHART_PIXELS} and {MAX_CHART_PIXELS} pixels, got {}x{}",
                    size.width, size.height
                ),
                field,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_regex() {
        assert!(HEX_COLOR_REGEX.is_match("#FFFFFF"));
        assert!(HEX_COLOR_REGEX.is_match("#8dd3c7"));
        assert!(!HEX_COLOR_REGEX.is_match("FFFFFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#FFF"));
        assert!(!HEX_COLOR_REGEX.is_match("#GG0000"));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_tiny_chart() {
        let mut config = Config::default();
        config.charts.monthly_usage.width = 10;
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ViewstatError::Validation { field: Some(ref f), .. } if f == "charts.monthly_usage"
        ));
    }

    #[test]
    fn test_rejects_bad_custom_palette() {
        let mut config = Config::default();
        config.charts.palette = PaletteConfig::Custom(vec![]);
        assert!(ConfigValidator::validate(&config).is_err());

        config.charts.palette = PaletteConfig::Custom(vec!["#123456".into(), "red".into()]);
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("'red'"));
    }

    #[test]
    fn test_rejects_small_max_rows() {
        let mut config = Config::default();
        config.tables.max_rows = 3;
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
