//! Session events
//!
//! Everything a session does is reported through a caller-supplied callback.
//! In `--json` mode each event is printed as one NDJSON line.

use serde::Serialize;

/// Session event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    SessionStarted {
        root: String,
    },
    ProjectSeeded {
        config: String,
    },
    FileChanged {
        path: String,
        is_folder: bool,
    },
    RebuildSkipped {
        path: String,
    },
    OutputsCleaned {
        removed: usize,
    },
    BuildStarted {
        reason: String,
    },
    BuildComplete {
        platforms: usize,
        written: usize,
    },
    BuildFailed {
        message: String,
    },
    Error {
        message: String,
    },
    Shutdown,
}

impl SessionEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
