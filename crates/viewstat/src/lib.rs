//! # viewstat
//!
//! Terminal dashboard and command-line front end for a Netflix viewing
//! history export.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod cli;
pub mod error;
pub mod session;
pub mod tui;

pub use cache::{CacheMetrics, DatasetVersion, PlotCache, WatchCountCache};
pub use cli::Cli;
pub use error::{AppError, AppResult};
pub use session::{Session, SessionEvent, View, ViewState, YearSlice};
