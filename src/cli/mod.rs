//! Command-line interface
//!
//! Thin layer over the mission controller: argument parsing, terminal
//! rendering and error reporting.

pub mod commands;
pub mod display;
pub mod output;
pub mod types;

use colored::Colorize;

pub use output::progress::create_spinner;
pub use types::{Cli, Commands};

/// Report a command failure and exit with status 1.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({ "error": format!("{err:#}") });
        println!("{}", serde_json::to_string_pretty(&body).unwrap_or_default());
    } else {
        eprintln!("{} {err:#}", "Error:".red().bold());
    }
    std::process::exit(1)
}
