//! Configuration loading for pi-security-shield
//!
//! Supports TOML configuration with embedded defaults. Everything here is
//! optional: with no config file present the scanner and audit log run on
//! built-in defaults.

use serde::Deserialize;
use std::path::PathBuf;

use crate::scanner::discovery::DEFAULT_EXCLUDED_DIRS;

/// Scan configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Additional search roots beyond the built-in extension directories
    pub extra_roots: Vec<String>,

    /// Directory names pruned before descending, at any depth
    pub exclude_dirs: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extra_roots: Vec::new(),
            exclude_dirs: DEFAULT_EXCLUDED_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Audit logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable JSONL audit logging of runtime verdicts
    pub enabled: bool,

    /// Path to the audit log file
    pub path: Option<String>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: Some("~/.pi/shield-audit.jsonl".to_string()),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub audit: AuditConfig,
}

impl Config {
    /// Load configuration from the standard locations or use defaults
    pub fn load() -> Self {
        let config_paths = [
            dirs::home_dir().map(|p| p.join(".pi/shield.toml")),
            Some(PathBuf::from(".pi/shield.toml")),
        ];

        for path in config_paths.into_iter().flatten() {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(&path) {
                    match toml::from_str(&content) {
                        Ok(config) => return config,
                        Err(e) => {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Config::default()
    }

    /// Load from a specific path
    pub fn load_from(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Expand ~ in path strings
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Get the audit log path (expanded)
    pub fn audit_path(&self) -> Option<PathBuf> {
        if !self.audit.enabled {
            return None;
        }
        self.audit.path.as_ref().map(|p| Self::expand_path(p))
    }
}

/// Embedded default configuration
pub const DEFAULT_CONFIG_TOML: &str = r#"
[scan]
extra_roots = []
exclude_dirs = ["node_modules", ".git", "dist", "build", "coverage", ".cache"]

[audit]
enabled = true
path = "~/.pi/shield-audit.jsonl"
"#;
