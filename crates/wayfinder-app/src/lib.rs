//! Application wiring for the wayfinder client.
//!
//! Composes the pipeline components (transcript matcher, route client,
//! map session) into the [`navigator::Navigator`] controller, and owns
//! configuration loading for the binary.

pub mod config;
pub mod navigator;

pub use config::{load_config, Config, ConfigError};
pub use navigator::{NavStatus, Navigator, RouteCompletion};
