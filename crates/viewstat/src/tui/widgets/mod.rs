//! TUI widgets

pub mod help;
pub mod monthly_chart;
pub mod watch_counts;
pub mod years;
