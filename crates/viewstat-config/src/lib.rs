//! # viewstat config
//!
//! Configuration schema, defaults, loading (YAML or TOML plus environment
//! overrides), and validation.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::*;
pub use schema::*;
pub use validator::*;
