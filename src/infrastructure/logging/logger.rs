use super::config::{LogConfig, LogFormat};
use anyhow::{Context, Result};
use std::io;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// File name prefix for rotated log files.
const LOG_FILE_NAME: &str = "jira-csv-import.log";

/// Logger implementation using tracing
///
/// Diagnostics never go to stdout; stdout carries the import report.
pub struct LoggerImpl {
    _guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Initialize the global subscriber with the given configuration
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    ///
    /// # Errors
    /// Returns an error if the level is invalid or a global subscriber is
    /// already installed
    pub fn init(config: &LogConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;

        let env_filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        let guard = if let Some(ref log_dir) = config.log_dir {
            let file_appender = rolling::daily(log_dir, LOG_FILE_NAME);
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            // File layer - always JSON for structured logging
            let file_layer = tracing_subscriber::fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_ansi(false)
                .with_current_span(true)
                .with_target(true)
                .with_filter(env_filter);

            tracing_subscriber::registry()
                .with(file_layer)
                .try_init()
                .context("failed to install file logger")?;

            Some(guard)
        } else {
            match config.format {
                LogFormat::Json => {
                    let stderr_layer = tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(io::stderr)
                        .with_current_span(true)
                        .with_target(true)
                        .with_filter(env_filter);

                    tracing_subscriber::registry()
                        .with(stderr_layer)
                        .try_init()
                        .context("failed to install logger")?;
                }
                LogFormat::Pretty => {
                    let stderr_layer = tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(io::stderr)
                        .with_target(false)
                        .with_filter(env_filter);

                    tracing_subscriber::registry()
                        .with(stderr_layer)
                        .try_init()
                        .context("failed to install logger")?;
                }
            }

            None
        };

        tracing::debug!(
            level = %config.level,
            format = ?config.format,
            file_output = config.log_dir.is_some(),
            "logger initialized"
        );

        Ok(Self { _guard: guard })
    }
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}
