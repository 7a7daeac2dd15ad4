//! JSONL audit logging for runtime verdicts
//!
//! Appends one JSON line per evaluated event. Logging is best-effort: an
//! unwritable log warns but never changes a verdict.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::event::ToolEvent;
use crate::verdict::Verdict;

/// Outcome recorded for an audit entry
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditOutcome {
    Allowed,
    Blocked,
    Disabled,
}

/// An audit log entry
#[derive(Debug, Serialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub outcome: AuditOutcome,

    /// Tool that was invoked
    pub tool: String,

    /// Summary of the event payload
    pub event_summary: String,

    /// Block reason, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl AuditEntry {
    /// Create an entry from an evaluated event
    pub fn new(event: &ToolEvent, verdict: &Verdict, shield_enabled: bool) -> Self {
        let outcome = if !shield_enabled {
            AuditOutcome::Disabled
        } else if verdict.is_allow() {
            AuditOutcome::Allowed
        } else {
            AuditOutcome::Blocked
        };

        Self {
            timestamp: Utc::now(),
            outcome,
            tool: event.tool.clone(),
            event_summary: event.summary(),
            reason: verdict.reason.clone(),
            session_id: event.session_id.clone(),
        }
    }
}

/// Audit logger
pub struct AuditLogger {
    writer: Option<BufWriter<File>>,
}

impl AuditLogger {
    /// Create a new audit logger; `None` disables logging
    pub fn new(path: Option<&Path>) -> Self {
        let writer = path.and_then(|p| {
            if let Some(parent) = p.parent() {
                let _ = std::fs::create_dir_all(parent);
            }

            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });

        Self { writer }
    }

    /// Append one entry
    pub fn log(&mut self, entry: &AuditEntry) -> Result<(), std::io::Error> {
        if let Some(ref mut writer) = self.writer {
            let json = serde_json::to_string(entry)?;
            writeln!(writer, "{}", json)?;
            writer.flush()?;
        }
        Ok(())
    }

    /// Append an entry for an evaluated event
    pub fn log_verdict(
        &mut self,
        event: &ToolEvent,
        verdict: &Verdict,
        shield_enabled: bool,
    ) -> Result<(), std::io::Error> {
        let entry = AuditEntry::new(event, verdict, shield_enabled);
        self.log(&entry)
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self { writer: None }
    }
}
