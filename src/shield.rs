//! Persistent shield toggle
//!
//! The enabled flag is the only durable state in the crate, stored as a
//! small JSON document at the project root. Loading fails open: a missing,
//! unreadable, or malformed settings file means the shield is on. Saving
//! propagates errors so a failed toggle is never silent.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings file name, resolved relative to the project directory.
pub const SHIELD_SETTINGS_FILE: &str = ".pi-security-shield.json";

fn default_true() -> bool {
    true
}

/// On-disk settings document. Unknown keys are ignored; an absent
/// `shieldEnabled` key reads as enabled.
#[derive(Debug, Serialize, Deserialize)]
struct ShieldSettings {
    #[serde(rename = "shieldEnabled", default = "default_true")]
    shield_enabled: bool,
}

/// Session-scoped shield state, loaded once at session start and passed
/// explicitly to the interception engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShieldState {
    pub enabled: bool,
}

impl Default for ShieldState {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl ShieldState {
    fn settings_path(project_dir: &Path) -> PathBuf {
        project_dir.join(SHIELD_SETTINGS_FILE)
    }

    /// Load the shield state for a project. Never fails: any read or
    /// parse error resolves to the enabled default.
    pub fn load(project_dir: &Path) -> Self {
        let path = Self::settings_path(project_dir);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str::<ShieldSettings>(&content) {
            Ok(settings) => Self {
                enabled: settings.shield_enabled,
            },
            Err(e) => {
                eprintln!(
                    "Warning: malformed shield settings at {} ({}), defaulting to enabled",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Persist the shield state for a project. Write failures propagate.
    pub fn save(&self, project_dir: &Path) -> io::Result<()> {
        let settings = ShieldSettings {
            shield_enabled: self.enabled,
        };
        let json = serde_json::to_string_pretty(&settings)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        std::fs::write(Self::settings_path(project_dir), json)
    }
}
