//! Implementation of the `jira-csv-import import` command.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use crate::adapters::{CsvSource, DryRunTracker, JiraClient};
use crate::cli::output::print_json;
use crate::domain::models::Config;
use crate::domain::ports::IssueTracker;
use crate::infrastructure::config::{ConfigLoader, ConfigOverrides, JiraOverrides};
use crate::infrastructure::logging::{LogConfig, LoggerImpl};
use crate::services::{report_headers, BatchRunner, BatchSummary, FieldMapper, IssueCreator};

#[derive(Args, Debug, Default)]
pub struct ImportArgs {
    /// CSV file to import (overrides CSV_PATH)
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// YAML config file (defaults to ./jira-import.yaml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Project key (overrides JIRA_PROJECT_KEY)
    #[arg(short, long, value_name = "KEY")]
    pub project: Option<String>,

    /// Issue type name (overrides JIRA_ISSUE_TYPE)
    #[arg(short = 't', long, value_name = "NAME")]
    pub issue_type: Option<String>,

    /// Parent epic key (overrides EPIC_KEY)
    #[arg(long, value_name = "KEY")]
    pub epic: Option<String>,

    /// Assignee account id (overrides ASSIGNEE_ACCOUNT_ID)
    #[arg(long, value_name = "ACCOUNT_ID")]
    pub assignee: Option<String>,

    /// Log payloads instead of creating issues
    #[arg(long)]
    pub dry_run: bool,
}

impl ImportArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            csv_path: self.csv.clone(),
            jira: JiraOverrides {
                project_key: self.project.clone(),
                issue_type: self.issue_type.clone(),
                epic_key: self.epic.clone(),
                assignee_account_id: self.assignee.clone(),
            },
        }
    }
}

pub async fn execute(args: ImportArgs, json_mode: bool) -> Result<()> {
    let config = ConfigLoader::load(args.config.as_deref(), &args.overrides())
        .context("Failed to load configuration")?;

    let log_config = LogConfig::try_from(&config.logging)?;
    let _logger = LoggerImpl::init(&log_config)?;
    info!(jira = ?config.jira, dry_run = args.dry_run, "configuration loaded");

    let csv_path = config
        .csv_path
        .clone()
        .context("CSV path is not configured")?;
    let mut source = CsvSource::open(&csv_path)?;

    let summary = if args.dry_run {
        let tracker = DryRunTracker::new(config.jira.project_key.trim());
        run_import(tracker, &config, &mut source, json_mode).await?
    } else {
        let tracker = JiraClient::from_config(&config.jira)?;
        run_import(tracker, &config, &mut source, json_mode).await?
    };

    if json_mode {
        print_json(&summary);
    }
    Ok(())
}

/// Run the batch over every row of `source` using `tracker`.
///
/// In JSON mode the progress lines are suppressed; the caller prints the
/// returned summary instead.
pub async fn run_import<T: IssueTracker>(
    tracker: T,
    config: &Config,
    source: &mut CsvSource,
    json_mode: bool,
) -> Result<BatchSummary> {
    let creator = IssueCreator::new(
        tracker,
        FieldMapper::new(config.field_rules()),
        config.issue_defaults(),
    );
    let runner = BatchRunner::new(creator);

    let headers = source.headers().to_vec();
    if json_mode {
        runner
            .run(source.rows(), &mut io::sink())
            .await
            .context("Failed to write report")
    } else {
        let mut out = io::stdout();
        report_headers(&headers, &mut out)?;
        out.flush()?;
        runner
            .run(source.rows(), &mut out)
            .await
            .context("Failed to write report")
    }
}
