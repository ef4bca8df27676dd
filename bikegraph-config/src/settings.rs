//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Dataset source files
    pub data: DataConfig,

    /// Chart rendering settings
    pub graph: GraphSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

impl Config {
    /// Validate every configuration section
    pub fn validate_all(&self) -> Result<(), ValidationErrors> {
        self.data.validate()?;
        self.graph.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            graph: GraphSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Dataset source configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DataConfig {
    /// Path to the daily rental CSV file
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Invalid daily CSV path"))]
    pub day_csv: String,

    /// Path to the hourly rental CSV file
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Invalid hourly CSV path"))]
    pub hour_csv: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            day_csv: "data/day.csv".to_string(),
            hour_csv: "data/hour.csv".to_string(),
        }
    }
}

/// Chart rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GraphSettings {
    /// Chart width in pixels
    #[validate(range(min = 100, max = 4000, message = "Width must be between 100 and 4000 pixels"))]
    pub width: u32,

    /// Chart height in pixels
    #[validate(range(min = 100, max = 4000, message = "Height must be between 100 and 4000 pixels"))]
    pub height: u32,

    /// Background color (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Background color must be valid hex color"))]
    pub background_color: String,

    /// Primary color for chart elements (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Primary color must be valid hex color"))]
    pub primary_color: String,

    /// Secondary color for chart elements (hex format)
    #[validate(regex(path = "crate::validation::HEX_COLOR_REGEX", message = "Secondary color must be valid hex color"))]
    pub secondary_color: String,

    /// Font family for text rendering
    pub font_family: String,

    /// Font size for labels
    #[validate(range(min = 8, max = 72, message = "Font size must be between 8 and 72"))]
    pub font_size: u32,

    /// Directory chart files are written into
    #[validate(custom(function = "crate::validation::validate_file_path", message = "Invalid output directory"))]
    pub output_dir: String,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            background_color: "#FFFFFF".to_string(),
            primary_color: "#1F77B4".to_string(),
            secondary_color: "#FF7F0E".to_string(),
            font_family: "sans-serif".to_string(),
            font_size: 14,
            output_dir: "charts".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoggingSettings {
    /// Log level filter
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Invalid log level"))]
    pub level: String,

    /// Whether to use pretty formatting with colors
    pub pretty: bool,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            pretty: true,
            file: None,
        }
    }
}
