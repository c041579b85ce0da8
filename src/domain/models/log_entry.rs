use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Maximum number of log entries kept by the mesh. Older entries are dropped.
pub const LOG_CAPACITY: usize = 8;

/// A single line in the mission log feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Time-ordered identifier; the random tail keeps entries created in
    /// the same millisecond distinct.
    pub id: Uuid,

    /// Who emitted the line (agent name, "System", "User", ...)
    pub source: String,

    /// Message text
    pub message: String,

    /// Local wall-clock time, `HH:MM:SS`
    pub time: String,
}

impl LogEntry {
    pub fn new(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            source: source.into(),
            message: message.into(),
            time: Local::now().format("%H:%M:%S").to_string(),
        }
    }
}

/// Renders as `[source]: message`, the form fed to the summary prompt.
impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.source, self.message)
    }
}
