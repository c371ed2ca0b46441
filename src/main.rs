//! jira-csv-import CLI entry point.

use clap::Parser;

use jira_csv_import::cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // A missing .env file is not an error; the environment may be set directly.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let run = async {
        match cli.command {
            Commands::Import(args) => {
                jira_csv_import::cli::commands::import::execute(args, cli.json).await
            }
        }
    };

    let result = tokio::select! {
        result = run => result,
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted by user (Ctrl+C).");
            std::process::exit(1);
        }
    };

    if let Err(err) = result {
        jira_csv_import::cli::handle_error(&err, cli.json);
    }
}
