use std::path::PathBuf;

use anyhow::{bail, Result};

use crate::domain::models::LoggingConfig;

/// Resolved logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (json, pretty)
    pub format: LogFormat,

    /// Directory for daily-rotated log files (optional, if None logs only to stderr)
    pub log_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(format: &str) -> Result<Self> {
        match format.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => bail!("Invalid log format: {other}"),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            log_dir: None,
        }
    }
}

impl TryFrom<&LoggingConfig> for LogConfig {
    type Error = anyhow::Error;

    fn try_from(config: &LoggingConfig) -> Result<Self> {
        Ok(Self {
            level: config.level.clone(),
            format: LogFormat::parse(&config.format)?,
            log_dir: config.log_dir.clone(),
        })
    }
}
