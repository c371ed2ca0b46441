use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::value::{Uncased, UncasedStr};
use figment::Figment;
use serde::Serialize;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Config file read from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "jira-import.yaml";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Invalid timeout_secs: {0}. Must be at least 1")]
    InvalidTimeout(u64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Field mapping #{0} has an empty column or field")]
    InvalidFieldMapping(usize),

    #[error("Config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),

    #[error("CSV not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("CSV has no headers: {}", .0.display())]
    MissingHeaders(PathBuf),

    #[error("Failed to read CSV {}: {source}", path.display())]
    CsvRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
}

/// Command-line values that take precedence over every other source.
///
/// Unset options are skipped so they do not mask lower layers.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csv_path: Option<PathBuf>,
    #[serde(skip_serializing_if = "JiraOverrides::is_empty")]
    pub jira: JiraOverrides,
}

/// Jira settings that can be given on the command line.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JiraOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epic_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_account_id: Option<String>,
}

impl JiraOverrides {
    fn is_empty(&self) -> bool {
        self.project_key.is_none()
            && self.issue_type.is_none()
            && self.epic_key.is_none()
            && self.assignee_account_id.is_none()
    }
}

/// Environment variables read verbatim as strings, with their config keys.
const STRING_ENV: [(&str, &str); 11] = [
    ("JIRA_BASE_URL", "jira.base_url"),
    ("JIRA_EMAIL", "jira.email"),
    ("JIRA_API_TOKEN", "jira.api_token"),
    ("JIRA_PROJECT_KEY", "jira.project_key"),
    ("JIRA_ISSUE_TYPE", "jira.issue_type"),
    ("EPIC_KEY", "jira.epic_key"),
    ("ASSIGNEE_ACCOUNT_ID", "jira.assignee_account_id"),
    ("CSV_PATH", "csv_path"),
    ("JIRA_IMPORT_LOG_LEVEL", "logging.level"),
    ("JIRA_IMPORT_LOG_FORMAT", "logging.format"),
    ("JIRA_IMPORT_LOG_DIR", "logging.log_dir"),
];

/// Map the numeric environment variables onto their config keys.
fn numeric_env_key(key: &UncasedStr) -> Option<Uncased<'_>> {
    match key.as_str().to_ascii_uppercase().as_str() {
        "JIRA_TIMEOUT_SECS" => Some(Uncased::from_borrowed("jira.timeout_secs")),
        _ => None,
    }
}

/// Merge the environment into `figment`.
///
/// Text settings are taken verbatim; figment's `Env` would turn an
/// all-digit token or account id into an integer. Only the timeout is parsed.
fn merge_env(figment: Figment) -> Figment {
    let figment = figment.merge(Env::raw().filter_map(numeric_env_key));
    STRING_ENV
        .iter()
        .filter_map(|&(var, key)| std::env::var(var).ok().map(|value| (key, value)))
        .fold(figment, |figment, (key, value)| {
            figment.merge(Serialized::default(key, value))
        })
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. YAML config file (`config_file`, or `jira-import.yaml` if present)
    /// 3. Environment variables (`JIRA_*`, `EPIC_KEY`, `ASSIGNEE_ACCOUNT_ID`, `CSV_PATH`)
    /// 4. Command-line overrides
    pub fn load(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Config, ConfigError> {
        let config = Self::figment(config_file, overrides)?
            .extract::<Config>()
            .map_err(Box::new)?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Build the merged provider stack without extracting.
    pub fn figment(config_file: Option<&Path>, overrides: &ConfigOverrides) -> Result<Figment, ConfigError> {
        let file = match config_file {
            Some(path) if !path.is_file() => {
                return Err(ConfigError::ConfigFileNotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        let figment = Figment::new()
            // 1. Start with programmatic defaults
            .merge(Serialized::defaults(Config::default()))
            // 2. Merge the YAML file (missing default file is skipped)
            .merge(Yaml::file(file));

        // 3. Merge environment variables
        let figment = merge_env(figment);

        // 4. Command-line values win
        Ok(figment.merge(Serialized::defaults(overrides)))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let required = [
            ("JIRA_BASE_URL", config.jira.base_url.as_str()),
            ("JIRA_EMAIL", config.jira.email.as_str()),
            ("JIRA_API_TOKEN", config.jira.api_token.as_str()),
            ("JIRA_PROJECT_KEY", config.jira.project_key.as_str()),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingSetting(name));
            }
        }

        if config
            .csv_path
            .as_ref()
            .is_none_or(|p| p.as_os_str().is_empty())
        {
            return Err(ConfigError::MissingSetting("CSV_PATH"));
        }

        if config.jira.issue_type.trim().is_empty() {
            return Err(ConfigError::MissingSetting("JIRA_ISSUE_TYPE"));
        }

        if config.jira.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.jira.timeout_secs));
        }

        for (idx, mapping) in config.field_map.iter().enumerate() {
            if mapping.column.is_empty() || mapping.field.trim().is_empty() {
                return Err(ConfigError::InvalidFieldMapping(idx + 1));
            }
        }

        // Validate logging config
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}
