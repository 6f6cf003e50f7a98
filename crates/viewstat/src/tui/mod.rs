//! Interactive dashboard.

pub mod app;
pub mod widgets;

pub use app::{run, App, SaveTarget};
