//! # viewstat graphs
//!
//! Device colors, the backend-independent [`Figure`] model, the two chart
//! builders, and a plotters renderer that writes figures as PNG or SVG.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod monthly_usage;
pub mod palette;
pub mod renderer;
pub mod types;
pub mod usage_by_date;

pub use monthly_usage::{plot_monthly_usage_by_device, MonthlyUsageChart};
pub use palette::{Colorizer, DeviceColorMap, Palette, SET3, TABLEAU, VIBRANT};
pub use renderer::{FigureRenderer, PlottersRenderer};
pub use types::*;
pub use usage_by_date::{plot_usage_by_date_and_device, UsageByDateChart};
