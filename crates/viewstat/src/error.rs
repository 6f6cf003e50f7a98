//! Application-wide error types using thiserror.

use viewstat_common::ViewstatError;

/// Errors raised by the dashboard session and the commands built on it.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A view was toggled before any year was chosen.
    #[error("Select a year first")]
    NoYearSelected,

    /// The requested year has no viewing records.
    #[error("No viewing records for {0}")]
    UnknownYear(i32),

    /// Loading, configuration, or rendering failure.
    #[error(transparent)]
    Viewstat(#[from] ViewstatError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Session errors are shown in the status line; the rest end the program.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NoYearSelected | Self::UnknownYear(_))
    }
}

/// Result type for the viewstat application.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(AppError::NoYearSelected.to_string(), "Select a year first");
        assert_eq!(AppError::UnknownYear(1999).to_string(), "No viewing records for 1999");

        let wrapped: AppError = ViewstatError::missing_column("Title").into();
        assert_eq!(wrapped.to_string(), "Missing required column: 'Title'");
    }

    #[test]
    fn test_recoverable() {
        assert!(AppError::NoYearSelected.is_recoverable());
        assert!(AppError::UnknownYear(2020).is_recoverable());
        assert!(!AppError::from(ViewstatError::graph("boom")).is_recoverable());
    }
}
