//! # viewstat history
//!
//! Loads a Netflix `ViewingActivity.csv` export into normalized records and
//! aggregates them into the summary tables the charts and dashboard use.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod aggregator;
pub mod filter;
pub mod loader;
pub mod normalize;
pub mod record;
pub mod table;

pub use aggregator::*;
pub use filter::*;
pub use loader::{load_viewing_activity, HistoryLoader, REQUIRED_COLUMNS};
pub use normalize::{month_begin, parse_duration_minutes, parse_start_time, NormalizeError};
pub use record::*;
pub use table::*;
