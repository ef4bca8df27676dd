//! Utility functions shared across the bikegraph workspace

use crate::error::{BikeGraphError, Result};
use chrono::NaiveDate;

/// Date format used by the dataset and the CLI (ISO calendar date)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date string (e.g. "2011-01-01")
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        BikeGraphError::validation_field(format!("invalid date '{}': {}", value, e), "date")
    })
}

/// Format a date for display and file names
pub fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
