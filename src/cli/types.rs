//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};

use super::commands::import::ImportArgs;

#[derive(Parser, Debug)]
#[command(name = "jira-csv-import")]
#[command(about = "Create Jira issues from the rows of a CSV file", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create one issue per CSV row
    Import(ImportArgs),
}
