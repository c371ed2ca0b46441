//! Output formatting utilities for the CLI.

use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: failed to serialize output: {e}"),
    }
}

/// Report a top-level error and exit with status 1.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        eprintln!("{}", serde_json::json!({ "error": format!("{err:#}") }));
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
