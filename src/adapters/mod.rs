//! Adapters connecting the domain ports to the outside world.

pub mod csv_source;
pub mod dry_run;
pub mod jira;

pub use csv_source::CsvSource;
pub use dry_run::DryRunTracker;
pub use jira::JiraClient;
