//! Dangerous command rules for runtime interception
//!
//! Matches shell commands that move data off the machine or touch
//! credential paths: outbound transfers, version-control pushes, raw
//! network listeners, and redirection into system or SSH paths.

use crate::rules::{Category, Rule, Severity, DANGEROUS_COMMAND_RULES};

pub const RULES: &[Rule] = &[
    // Outbound transfers
    Rule::new(
        "curl-outbound",
        r"(?i)\bcurl\b.*https?://",
        "curl invocation targeting a remote URL",
        Severity::High,
        Category::DangerousCommand,
    ),
    Rule::new(
        "wget-outbound",
        r"(?i)\bwget\b.*https?://",
        "wget invocation targeting a remote URL",
        Severity::High,
        Category::DangerousCommand,
    ),
    // Version control push
    Rule::new(
        "git-push",
        r"(?i)\bgit\s+push\b",
        "git push to a remote repository",
        Severity::Medium,
        Category::DangerousCommand,
    ),
    // Raw network listeners
    Rule::new(
        "netcat",
        r"(?i)\b(nc|ncat|netcat)\s+",
        "Raw network connection via netcat",
        Severity::High,
        Category::DangerousCommand,
    ),
    // Redirection into credential or system paths
    Rule::new(
        "redirect-etc",
        r">\s*/etc/",
        "Output redirection into /etc",
        Severity::Critical,
        Category::DangerousCommand,
    ),
    Rule::new(
        "redirect-ssh",
        r">\s*~?/?\S*\.ssh/",
        "Output redirection into an .ssh directory",
        Severity::Critical,
        Category::DangerousCommand,
    ),
];

/// Netcat binaries checked against tokenized command words. Catches
/// quote-obfuscated spellings (`'n'c -l`) that the regex table misses.
const NETCAT_COMMANDS: &[&str] = &["nc", "ncat", "netcat"];

fn invokes_netcat(command: &str) -> bool {
    let tokens = match shlex::split(command) {
        Some(t) => t,
        None => return false,
    };
    tokens.iter().any(|token| {
        let base = token.rsplit('/').next().unwrap_or(token);
        NETCAT_COMMANDS.contains(&base)
    })
}

/// Match a shell command against the dangerous-command catalog.
///
/// Returns the first matching rule in catalog order, falling back to the
/// tokenized netcat check when no pattern matched.
pub fn match_command(command: &str) -> Option<&'static Rule> {
    if let Some(rule) = DANGEROUS_COMMAND_RULES.first_match(command) {
        return Some(rule);
    }
    if invokes_netcat(command) {
        return RULES.iter().find(|r| r.id == "netcat");
    }
    None
}
