//! Tracing subscriber setup shared by the bikegraph binaries

use std::path::{Path, PathBuf};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Console output format of the subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line output with colors, for interactive runs
    Pretty,
    /// Single-line output, for log files and scripted runs
    Compact,
}

/// Settings the subscriber is built from
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Level filter, any directive `EnvFilter` accepts (e.g. "info", "debug")
    pub level: String,
    pub format: LogFormat,
    /// Append to this file instead of writing to stdout
    pub file: Option<PathBuf>,
    /// Whether events carry their module path
    pub show_target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
            show_target: true,
        }
    }
}

fn open_log_file(path: &Path) -> std::io::Result<std::fs::File> {
    std::fs::OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global tracing subscriber
///
/// An unparsable level directive falls back to "info". Fails if a subscriber
/// is already installed, which callers may treat as non-fatal.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_new(&config.level)
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    let registry = tracing_subscriber::registry().with(filter);

    match (config.format, &config.file) {
        (LogFormat::Pretty, None) => {
            registry
                .with(fmt::layer().pretty().with_target(config.show_target))
                .try_init()?;
        }
        (LogFormat::Pretty, Some(path)) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    fmt::layer()
                        .pretty()
                        .with_target(config.show_target)
                        .with_ansi(false)
                        .with_writer(file),
                )
                .try_init()?;
        }
        (LogFormat::Compact, None) => {
            registry
                .with(fmt::layer().compact().with_target(config.show_target))
                .try_init()?;
        }
        (LogFormat::Compact, Some(path)) => {
            let file = open_log_file(path)?;
            registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(config.show_target)
                        .with_ansi(false)
                        .with_writer(file),
                )
                .try_init()?;
        }
    }

    Ok(())
}

/// Install the subscriber with the default settings
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging(LoggingConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file.is_none());
        assert!(config.show_target);
    }
}
