//! Runtime interception engine
//!
//! Evaluates tool-invocation events against the dangerous-command and
//! sensitive-file catalogs. A rule match suspends the event by asking the
//! confirmation surface; the caller's pipeline stays blocked until the
//! answer arrives. With the shield disabled every event is allowed without
//! evaluation.

use crate::event::{ToolAction, ToolEvent};
use crate::rules::{dangerous, sensitive};
use crate::shield::ShieldState;
use crate::verdict::{Verdict, BLOCKED_COMMAND_REASON, BLOCKED_PATH_REASON};

/// External confirmation surface.
///
/// Implementors present a yes/no question and return the user's answer.
/// A session that ends before the prompt resolves must answer `false`:
/// an unconfirmed event is a declined event.
pub trait ConfirmationUi {
    fn confirm(&mut self, title: &str, message: &str) -> bool;
}

/// Confirmation surface that declines everything. For non-interactive
/// callers that want matched events blocked outright.
pub struct AutoDecline;

impl ConfirmationUi for AutoDecline {
    fn confirm(&mut self, _title: &str, _message: &str) -> bool {
        false
    }
}

/// The interception engine. Holds the session's shield state, passed in
/// explicitly so concurrent sessions never share a toggle.
pub struct ShieldEngine {
    state: ShieldState,
}

impl ShieldEngine {
    pub fn new(state: ShieldState) -> Self {
        Self { state }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn set_state(&mut self, state: ShieldState) {
        self.state = state;
    }

    /// Evaluate one event and return the verdict.
    ///
    /// Events are independent: no cross-event memory, one confirmation at
    /// most per event.
    pub fn evaluate(&self, event: &ToolEvent, ui: &mut dyn ConfirmationUi) -> Verdict {
        if !self.state.enabled {
            return Verdict::allow();
        }

        match &event.action {
            ToolAction::Command { command } => match dangerous::match_command(command) {
                Some(rule) => {
                    let message = format!(
                        "Suspicious shell command detected: \"{}\". {}. Allow execution?",
                        command, rule.description
                    );
                    if ui.confirm("Dangerous command", &message) {
                        Verdict::allow()
                    } else {
                        Verdict::block(BLOCKED_COMMAND_REASON)
                    }
                }
                None => Verdict::allow(),
            },
            ToolAction::WriteFile { path } | ToolAction::EditFile { path } => {
                match sensitive::match_path(path) {
                    Some(rule) => {
                        let message = format!(
                            "Attempting to modify sensitive file: \"{}\". {}. Allow?",
                            path, rule.description
                        );
                        if ui.confirm("Sensitive file", &message) {
                            Verdict::allow()
                        } else {
                            Verdict::block(BLOCKED_PATH_REASON)
                        }
                    }
                    None => Verdict::allow(),
                }
            }
            // no rules defined for other tools
            ToolAction::Other { .. } => Verdict::allow(),
        }
    }
}
