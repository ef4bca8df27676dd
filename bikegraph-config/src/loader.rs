//! Configuration loading utilities

use crate::Config;
use bikegraph_common::Result as BikeGraphResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// What can go wrong between reading a file and handing out a valid `Config`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// A `BIKEGRAPH_*` variable held a value the target field cannot take
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for bikegraph_common::BikeGraphError {
    fn from(err: ConfigError) -> Self {
        bikegraph_common::BikeGraphError::config(err.to_string())
    }
}

/// Entry points resolving the active configuration
pub struct ConfigLoader;

impl ConfigLoader {
    /// Read one YAML file, apply `BIKEGRAPH_*` overrides, then validate
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;

        config.validate_all().map_err(ConfigError::ValidationError)?;

        debug!("Configuration loaded from {}", path.as_ref().display());
        Ok(config)
    }

    /// Resolve the configuration without an explicit path
    ///
    /// Search order: `BIKEGRAPH_CONFIG_PATH`, then `config.yaml` / `config.yml`
    /// in the working directory, then built-in defaults. Environment overrides
    /// apply in every case.
    pub fn load() -> BikeGraphResult<Config> {
        let config = if let Ok(config_path) = env::var("BIKEGRAPH_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::ValidationError)?;
            config
        };

        Ok(config)
    }

    /// `load_config` with the error mapped into the crate-wide type
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BikeGraphResult<Config> {
        Ok(Self::load_config(path)?)
    }

    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        // Dataset overrides
        if let Ok(day_csv) = env::var("BIKEGRAPH_DAY_CSV") {
            config.data.day_csv = day_csv;
        }

        if let Ok(hour_csv) = env::var("BIKEGRAPH_HOUR_CSV") {
            config.data.hour_csv = hour_csv;
        }

        // Chart overrides
        if let Ok(output_dir) = env::var("BIKEGRAPH_OUTPUT_DIR") {
            config.graph.output_dir = output_dir;
        }

        if let Ok(width) = env::var("BIKEGRAPH_GRAPH_WIDTH") {
            config.graph.width = width.parse().map_err(|e| ConfigError::EnvParseError {
                var: "BIKEGRAPH_GRAPH_WIDTH".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(height) = env::var("BIKEGRAPH_GRAPH_HEIGHT") {
            config.graph.height = height.parse().map_err(|e| ConfigError::EnvParseError {
                var: "BIKEGRAPH_GRAPH_HEIGHT".to_string(),
                source: Box::new(e),
            })?;
        }

        // Logging overrides
        if let Ok(level) = env::var("BIKEGRAPH_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(file) = env::var("BIKEGRAPH_LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}
