//! Terminal progress output.

pub mod progress;
