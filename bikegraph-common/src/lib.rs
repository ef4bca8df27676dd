//! Common types, errors, logging, and dataset loading for bikegraph

pub mod dataset;
pub mod error;
pub mod logging;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use dataset::{init_snapshot, snapshot, RentalDataset};
pub use error::{BikeGraphError, Result};
pub use logging::{init_default_logging, init_logging, LogFormat, LoggingConfig};
pub use types::*;
