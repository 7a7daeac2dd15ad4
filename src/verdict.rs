//! Verdicts returned for evaluated runtime events
//!
//! The shield never executes or aborts anything itself: it returns a
//! `Verdict` and the agent runtime enforces it.

use serde::Serialize;

/// Fixed reason string for commands blocked by the dangerous-command rules.
pub const BLOCKED_COMMAND_REASON: &str = "blocked by command pattern";

/// Fixed reason string for writes blocked by the sensitive-file rules.
pub const BLOCKED_PATH_REASON: &str = "blocked by sensitive-path pattern";

/// The allow/block outcome for one evaluated event
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    /// Whether the event may proceed
    pub allow: bool,

    /// Reason for a block; absent on allow
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Verdict {
    /// Create an allow verdict
    pub fn allow() -> Self {
        Verdict {
            allow: true,
            reason: None,
        }
    }

    /// Create a block verdict with a reason
    pub fn block(reason: impl Into<String>) -> Self {
        Verdict {
            allow: false,
            reason: Some(reason.into()),
        }
    }

    pub fn is_allow(&self) -> bool {
        self.allow
    }

    pub fn is_block(&self) -> bool {
        !self.allow
    }

    /// Serialize to the JSON form consumed by the agent runtime
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"allow":false}"#.to_string())
    }
}
