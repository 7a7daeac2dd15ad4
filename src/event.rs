//! Tool-invocation event parsing
//!
//! Parses the JSON events the Pi agent runtime dispatches before executing
//! a tool: `{"tool":"bash","args":{"command":...}}` for shell commands,
//! `{"tool":"write","args":{"path":...}}` / `{"tool":"edit",...}` for file
//! mutations. Unrecognized tools are preserved and passed through.

use serde::Deserialize;

/// A tool-invocation event received from the agent runtime
#[derive(Debug, Clone)]
pub struct ToolEvent {
    /// Name of the tool being invoked (e.g., "bash", "write", "edit")
    pub tool: String,

    /// Classified action payload
    pub action: ToolAction,

    /// Optional session identifier
    pub session_id: Option<String>,
}

/// Kind-specific event payload
#[derive(Debug, Clone)]
pub enum ToolAction {
    /// Shell command execution
    Command { command: String },

    /// File write
    WriteFile { path: String },

    /// File edit
    EditFile { path: String },

    /// Any other tool - no rules defined, passed through
    Other { raw: serde_json::Value },
}

#[derive(Deserialize)]
struct RawEvent {
    tool: String,

    #[serde(default)]
    args: serde_json::Value,

    #[serde(default)]
    session_id: Option<String>,
}

impl ToolEvent {
    /// Parse an event from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawEvent = serde_json::from_str(json)?;
        Ok(Self::from_raw(raw))
    }

    fn from_raw(raw: RawEvent) -> Self {
        let command = raw
            .args
            .get("command")
            .and_then(|v| v.as_str())
            .map(String::from);
        let path = raw
            .args
            .get("path")
            .and_then(|v| v.as_str())
            .map(String::from);

        let tool = raw.tool.to_lowercase();
        let action = match (tool.as_str(), command, path) {
            ("bash" | "shell", Some(command), _) => ToolAction::Command { command },
            ("write", _, Some(path)) => ToolAction::WriteFile { path },
            ("edit", _, Some(path)) => ToolAction::EditFile { path },
            _ => ToolAction::Other { raw: raw.args },
        };

        Self {
            tool: raw.tool,
            action,
            session_id: raw.session_id,
        }
    }

    /// Get a short summary of the event for logging
    pub fn summary(&self) -> String {
        match &self.action {
            ToolAction::Command { command } => {
                let truncated = if command.len() > 100 {
                    format!("{}...", &command[..100])
                } else {
                    command.clone()
                };
                format!("bash: {}", truncated)
            }
            ToolAction::WriteFile { path } => format!("write: {}", path),
            ToolAction::EditFile { path } => format!("edit: {}", path),
            ToolAction::Other { .. } => format!("tool: {}", self.tool),
        }
    }
}
