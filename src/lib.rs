//! jira-csv-import - create Jira issues from CSV rows
//!
//! Each CSV row becomes one `POST /rest/api/3/issue` request. Columns are
//! mapped onto Jira fields by a configurable rule table; descriptions are
//! converted to Atlassian Document Format.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, errors, and the `IssueTracker` port
//! - **Service Layer** (`services`): field mapping, issue creation, batch run
//! - **Adapters** (`adapters`): Jira HTTP client, dry-run tracker, CSV input
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use jira_csv_import::{BatchRunner, CsvSource, FieldMapper, IssueCreator, JiraClient};
//!
//! let client = JiraClient::new("https://acme.atlassian.net", "me@acme.test", "token")?;
//! let creator = IssueCreator::new(client, FieldMapper::new(config.field_rules()), config.issue_defaults());
//! let mut source = CsvSource::open("issues.csv")?;
//! let summary = BatchRunner::new(creator).run(source.rows(), &mut std::io::stdout()).await?;
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{CsvSource, DryRunTracker, JiraClient};
pub use domain::models::{Config, Document, FieldMap, FieldMapping, FieldRule, IssuePayload, Row};
pub use domain::ports::IssueTracker;
pub use domain::{DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader, ConfigOverrides};
pub use services::{parse_labels, BatchRunner, BatchSummary, FieldMapper, IssueCreator, RowOutcome};
