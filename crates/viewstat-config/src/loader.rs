//! Configuration loading: file, then environment overrides, then validation.

use crate::schema::Config;
use crate::validator::ConfigValidator;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};
use viewstat_common::{Result as ViewstatResult, ViewstatError};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "VIEWSTAT_CONFIG_PATH";

/// Files probed in the working directory when no path is given.
const DEFAULT_CONFIG_FILES: [&str; 3] = ["viewstat.yaml", "viewstat.yml", "viewstat.toml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("Failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {message}")]
    EnvParse { var: String, message: String },
}

impl From<ConfigError> for ViewstatError {
    fn from(err: ConfigError) -> Self {
        let message = err.to_string();
        ViewstatError::config_with_source(message, err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration: an explicit path wins, then `VIEWSTAT_CONFIG_PATH`,
    /// then the default file names, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> ViewstatResult<Config> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(|| {
                DEFAULT_CONFIG_FILES
                    .iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            });

        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::parse_file(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load and validate a specific file without environment overrides.
    pub fn load_from_file(path: impl AsRef<Path>) -> ViewstatResult<Config> {
        let config = Self::parse_file(path.as_ref())?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Parse a configuration file; `.toml` files are TOML, everything else YAML.
    pub fn parse_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content, path.extension().and_then(|e| e.to_str()))
    }

    /// Parse configuration text in the format implied by `extension`.
    pub fn parse_str(content: &str, extension: Option<&str>) -> Result<Config, ConfigError> {
        match extension {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(toml::from_str(content)?),
            _ => Ok(serde_yaml::from_str(content)?),
        }
    }

    /// Apply `VIEWSTAT_*` environment variable overrides.
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, so tests need not touch the process environment.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("VIEWSTAT_HISTORY_PATH") {
            config.data.history_path = PathBuf::from(path);
        }

        if let Some(dir) = lookup("VIEWSTAT_OUTPUT_DIR") {
            config.output.dir = PathBuf::from(dir);
        }

        if let Some(level) = lookup("VIEWSTAT_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(verbose) = lookup("VIEWSTAT_VERBOSE_TABLES") {
            config.tables.verbose = parse_bool(&verbose).ok_or_else(|| ConfigError::EnvParse {
                var: "VIEWSTAT_VERBOSE_TABLES".to_string(),
                message: format!("expected a boolean, got '{verbose}'"),
            })?;
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ImageFormat;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_partial_yaml_keeps_defaults() {
        let config = ConfigLoader::parse_str("output:\n  format: svg\n", Some("yaml")).unwrap();
        assert_eq!(config.output.format, ImageFormat::Svg);
        assert_eq!(config.output.dir, PathBuf::from("charts"));
        assert_eq!(config.tables, Config::default().tables);
    }

    #[test]
    fn test_parse_toml() {
        let content = r##"
[tables]
verbose = true
display_all = true

[charts]
palette = { custom = ["#112233", "#445566"] }
"##;
        let config = ConfigLoader::parse_str(content, Some("toml")).unwrap();
        assert!(config.tables.verbose);
        assert!(config.tables.display_all);
        assert_eq!(
            config.charts.palette,
            crate::PaletteConfig::Custom(vec!["#112233".to_string(), "#445566".to_string()])
        );
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("VIEWSTAT_HISTORY_PATH", "/tmp/history.csv"),
            ("VIEWSTAT_OUTPUT_DIR", "/tmp/out"),
            ("VIEWSTAT_LOG_LEVEL", "debug"),
            ("VIEWSTAT_VERBOSE_TABLES", "yes"),
        ]);

        ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap();

        assert_eq!(config.data.history_path, PathBuf::from("/tmp/history.csv"));
        assert_eq!(config.output.dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.logging.level, "debug");
        assert!(config.tables.verbose);
    }

    #[test]
    fn test_env_override_rejects_bad_bool() {
        let mut config = Config::default();
        let lookup = lookup_from(&[("VIEWSTAT_VERBOSE_TABLES", "sometimes")]);

        let err = ConfigLoader::apply_overrides_from(&mut config, lookup).unwrap_err();
        assert!(err.to_string().contains("VIEWSTAT_VERBOSE_TABLES"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ConfigLoader::load_from_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ViewstatError::Config { .. }));
    }
}
