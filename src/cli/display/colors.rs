//! Status and role color mapping for CLI output.
//!
//! All coloring respects `NO_COLOR` env var automatically via the `colored` crate.

use colored::Colorize;

/// Returns a colored string for an agent status.
///
/// Green: success. Yellow: working. Cyan: communicating. Dim: idle.
pub fn colorize_status(status: &str) -> colored::ColoredString {
    match status.to_lowercase().as_str() {
        "success" => status.green().bold(),
        "working" => status.yellow(),
        "communicating" => status.cyan(),
        "idle" => status.dimmed(),
        _ => status.white(),
    }
}

/// Returns a colored string for agent role values.
///
/// Orchestrator = magenta bold, Specialist = cyan, Worker = white.
pub fn colorize_role(role: &str) -> colored::ColoredString {
    match role.to_lowercase().as_str() {
        "orchestrator" => role.magenta().bold(),
        "specialist" => role.cyan(),
        _ => role.white(),
    }
}

/// Styled label for detail views (bold + dimmed colon).
pub fn label(name: &str) -> String {
    format!("{}{}", name.bold(), ":".dimmed())
}

/// Section header with underline.
pub fn section_header(title: &str) -> String {
    format!("\n{}", title.bold().underline())
}
