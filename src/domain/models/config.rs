use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::field_map::{default_field_mappings, FieldMap, FieldMapping};
use super::payload::IssueDefaults;

/// Main configuration structure for the importer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Jira connection and issue defaults
    #[serde(default)]
    pub jira: JiraConfig,

    /// Path to the CSV file to import
    #[serde(default)]
    pub csv_path: Option<PathBuf>,

    /// CSV column to Jira field mappings, applied in order
    #[serde(default = "default_field_mappings")]
    pub field_map: Vec<FieldMapping>,

    /// Custom fields that expect a list of strings instead of a string
    #[serde(default)]
    pub list_custom_fields: Vec<String>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jira: JiraConfig::default(),
            csv_path: None,
            field_map: default_field_mappings(),
            list_custom_fields: vec![],
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Resolve the configured mappings into the mapper's rule table.
    pub fn field_rules(&self) -> FieldMap {
        FieldMap::resolve(&self.field_map, &self.list_custom_fields)
    }

    /// Per-run issue values. Blank optional keys count as unset.
    pub fn issue_defaults(&self) -> IssueDefaults {
        IssueDefaults {
            project_key: self.jira.project_key.trim().to_string(),
            issue_type: self.jira.issue_type.trim().to_string(),
            parent_key: non_blank(self.jira.epic_key.as_deref()),
            assignee_id: non_blank(self.jira.assignee_account_id.as_deref()),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Jira connection configuration
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct JiraConfig {
    /// Site URL, e.g. `https://your-domain.atlassian.net`
    #[serde(default)]
    pub base_url: String,

    /// Account email used for basic auth
    #[serde(default)]
    pub email: String,

    /// API token used for basic auth
    #[serde(default)]
    pub api_token: String,

    /// Key of the project receiving the issues
    #[serde(default)]
    pub project_key: String,

    /// Issue type name
    #[serde(default = "default_issue_type")]
    pub issue_type: String,

    /// Parent (epic) issue key
    #[serde(default)]
    pub epic_key: Option<String>,

    /// Atlassian account id to assign issues to
    #[serde(default)]
    pub assignee_account_id: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_issue_type() -> String {
    "Task".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"[REDACTED]")
            .field("project_key", &self.project_key)
            .field("issue_type", &self.issue_type)
            .field("epic_key", &self.epic_key)
            .field("assignee_account_id", &self.assignee_account_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            email: String::new(),
            api_token: String::new(),
            project_key: String::new(),
            issue_type: default_issue_type(),
            epic_key: None,
            assignee_account_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rotated log files; stderr when unset
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
