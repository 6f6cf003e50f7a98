//! # viewstat common
//!
//! Shared error type, logging setup, and formatting helpers used by every
//! crate in the viewstat workspace.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{Result, ViewstatError};
pub use logging::{init_dev_logging, init_logging, LogTarget, LoggingConfig, LoggingGuard};
pub use utils::*;
