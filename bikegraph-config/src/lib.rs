//! Configuration management for bikegraph

pub mod loader;
pub mod settings;
pub mod validation;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, DataConfig, GraphSettings, LoggingSettings};
