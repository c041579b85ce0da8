//! Spinner utilities using indicatif for terminal output
//!
//! Spinners are drawn on stderr so they never mix with command output.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "[{elapsed_precise}] {spinner:.green} {msg}";
const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Create a spinner for an operation of unknown length.
///
/// # Example
/// ```
/// use agentmesh::cli::output::progress::create_spinner;
///
/// let spinner = create_spinner("Consulting the planning model...");
/// spinner.finish_and_clear();
/// ```
pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    let style = ProgressStyle::default_spinner()
        .template(SPINNER_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars(SPINNER_CHARS);
    spinner.set_style(style);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}

/// Print `line` above the spinner if it is still drawing, else to stdout.
pub fn print_line(spinner: Option<&ProgressBar>, line: &str) {
    match spinner {
        Some(pb) if !pb.is_finished() => pb.suspend(|| println!("{line}")),
        _ => println!("{line}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_message() {
        let spinner = create_spinner("working");
        assert_eq!(spinner.message(), "working");
        spinner.finish_and_clear();
        assert!(spinner.is_finished());
    }
}
