//! The crate-wide error type

use thiserror::Error;

/// Result alias used across the bikegraph crates
pub type Result<T> = std::result::Result<T, BikeGraphError>;

/// Everything that can go wrong while loading data, reading configuration,
/// or drawing a chart
///
/// An empty selection is deliberately NOT an error; reports represent it as
/// an absent result and leave the messaging to their caller.
#[derive(Error, Debug)]
pub enum BikeGraphError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed source data: unparsable rows, out-of-range categorical
    /// codes, bad dates
    #[error("Dataset error: {message}")]
    Dataset {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Chart error: {message}")]
    Chart {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Rejected user input, carrying the offending field where known
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BikeGraphError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Generic error wrapping an underlying cause
    pub fn with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Generic {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn dataset(msg: impl Into<String>) -> Self {
        Self::Dataset {
            message: msg.into(),
            source: None,
        }
    }

    /// Dataset error wrapping an underlying cause, used to attach row
    /// context to a conversion failure
    pub fn dataset_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Dataset {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn chart(msg: impl Into<String>) -> Self {
        Self::Chart {
            message: msg.into(),
            source: None,
        }
    }

    pub fn chart_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Chart {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }
}

#[cfg(feature = "plotters")]
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for BikeGraphError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::chart_with_source("Chart rendering failed", err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{error::Error, io};

    #[test]
    fn test_display_carries_category_and_message() {
        assert_eq!(
            BikeGraphError::config("missing field").to_string(),
            "Configuration error: missing field"
        );
        assert_eq!(
            BikeGraphError::dataset("bad row").to_string(),
            "Dataset error: bad row"
        );
        assert_eq!(
            BikeGraphError::chart("empty data").to_string(),
            "Chart error: empty data"
        );
        // Generic errors print the bare message
        assert_eq!(BikeGraphError::new("plain").to_string(), "plain");
    }

    #[test]
    fn test_validation_keeps_field_name() {
        let err = BikeGraphError::validation_field("out of range", "weather");
        match err {
            BikeGraphError::Validation { field, .. } => {
                assert_eq!(field.as_deref(), Some("weather"));
            }
            other => panic!("unexpected variant: {:?}", other),
        }

        let bare = BikeGraphError::validation("out of range");
        assert!(bare.to_string().contains("Validation error"));
    }

    #[test]
    fn test_source_chain_is_walkable() {
        let root = io::Error::new(io::ErrorKind::NotFound, "file missing");
        let middle = BikeGraphError::dataset_with_source("load failed", root);
        let top = BikeGraphError::with_source("run aborted", middle);

        let mut depth = 0;
        let mut current: &dyn Error = &top;
        while let Some(source) = current.source() {
            current = source;
            depth += 1;
        }
        assert_eq!(depth, 2);
    }

    #[test]
    fn test_io_conversion() {
        let err: BikeGraphError =
            io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
        assert!(err.to_string().contains("I/O error"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_result_alias() {
        fn may_fail(ok: bool) -> Result<u32> {
            if ok {
                Ok(7)
            } else {
                Err(BikeGraphError::new("nope"))
            }
        }

        assert_eq!(may_fail(true).unwrap(), 7);
        assert!(may_fail(false).is_err());
    }
}
