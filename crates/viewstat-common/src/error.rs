//! Error types and utilities for viewstat

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for viewstat operations
pub type Result<T> = std::result::Result<T, ViewstatError>;

/// Main error type for viewstat operations
#[derive(Error, Debug)]
pub enum ViewstatError {
    /// The viewing-history file does not exist
    #[error("History file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Malformed input (CSV structure, timestamps, durations)
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {l}")).unwrap_or_default())]
    Parse {
        message: String,
        line: Option<u64>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A required column is absent from the header row
    #[error("Missing required column: '{column}'")]
    MissingColumn { column: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for configuration values or user input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Graph building and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ViewstatError {
    /// Create a missing-file error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a parse error without position information
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
            line: None,
            source: None,
        }
    }

    /// Create a parse error for a specific input line
    pub fn parse_at_line(msg: impl Into<String>, line: u64) -> Self {
        Self::Parse {
            message: msg.into(),
            line: Some(line),
            source: None,
        }
    }

    /// Create a parse error with source
    pub fn parse_with_source(
        msg: impl Into<String>,
        line: Option<u64>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Parse {
            message: msg.into(),
            line,
            source: Some(Box::new(source)),
        }
    }

    /// Create a missing-column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the error comes from the input file rather than the program setup
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::Parse { .. } | Self::MissingColumn { .. }
        )
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to ViewstatError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for ViewstatError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_error_creation() {
        let missing = ViewstatError::file_not_found("datasets/ViewingActivity.csv");
        assert_eq!(
            missing.to_string(),
            "History file not found: datasets/ViewingActivity.csv"
        );

        let column = ViewstatError::missing_column("Device Type");
        assert_eq!(column.to_string(), "Missing required column: 'Device Type'");

        let validation = ViewstatError::validation_field("must be positive", "charts.width");
        assert!(validation.to_string().contains("Validation error"));
        assert!(validation.to_string().contains("must be positive"));
    }

    #[test]
    fn test_parse_error_display() {
        let plain = ViewstatError::parse("bad duration");
        assert_eq!(plain.to_string(), "Parse error: bad duration");

        let positioned = ViewstatError::parse_at_line("bad duration", 7);
        assert_eq!(positioned.to_string(), "Parse error at line 7: bad duration");
    }

    #[test]
    fn test_error_with_source() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let wrapped = ViewstatError::config_with_source("Config loading failed", io_error);

        assert!(wrapped.to_string().contains("Config loading failed"));
        assert!(wrapped.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: ViewstatError = io_error.into();

        assert!(error.to_string().contains("I/O error"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_is_input_error() {
        assert!(ViewstatError::file_not_found("x.csv").is_input_error());
        assert!(ViewstatError::parse("x").is_input_error());
        assert!(ViewstatError::missing_column("Title").is_input_error());
        assert!(!ViewstatError::config("x").is_input_error());
        assert!(!ViewstatError::graph("x").is_input_error());
    }
}
