//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Pretty or JSON formatting on stderr
//! - Optional daily-rotated log files
//! - Secret scrubbing for diagnostic text

pub mod config;
pub mod logger;
pub mod secret_scrubbing;

pub use config::{LogConfig, LogFormat};
pub use logger::LoggerImpl;
pub use secret_scrubbing::SecretScrubber;
