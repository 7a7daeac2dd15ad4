//! Sensitive file rules for runtime interception
//!
//! Matches write/edit targets whose modification can leak credentials or
//! tamper with repository and dependency integrity.

use crate::rules::{Category, Rule, Severity, SENSITIVE_FILE_RULES};

pub const RULES: &[Rule] = &[
    Rule::new(
        "env-file",
        r"\.env$",
        "Environment file may contain secrets",
        Severity::Critical,
        Category::SensitiveFile,
    ),
    Rule::new(
        "env-variant",
        r"\.env\.(local|production)$",
        "Environment file may contain secrets",
        Severity::Critical,
        Category::SensitiveFile,
    ),
    Rule::new(
        "ssh-directory",
        r"\.ssh/",
        "SSH credential directory",
        Severity::Critical,
        Category::SensitiveFile,
    ),
    Rule::new(
        "git-config",
        r"\.git/config$",
        "Repository configuration controls remotes and hooks",
        Severity::High,
        Category::SensitiveFile,
    ),
    Rule::new(
        "package-lockfile",
        r"package-lock\.json$",
        "Dependency lockfile controls resolved package versions",
        Severity::Medium,
        Category::SensitiveFile,
    ),
];

/// Expand a leading `~` so home-relative targets match the same rules as
/// absolute ones.
fn normalize_path(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}

/// Match a write/edit target path against the sensitive-file catalog.
pub fn match_path(path: &str) -> Option<&'static Rule> {
    SENSITIVE_FILE_RULES.first_match(&normalize_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_file_matches() {
        let rule = match_path(".env").unwrap();
        assert_eq!(rule.id, "env-file");
        assert!(match_path("/path/to/project/.env").is_some());
    }

    #[test]
    fn test_env_example_allowed() {
        assert!(match_path(".env.example").is_none());
        assert!(match_path(".envrc").is_none());
    }

    #[test]
    fn test_env_variants_match() {
        assert!(match_path(".env.local").is_some());
        assert!(match_path("app/.env.production").is_some());
    }

    #[test]
    fn test_ssh_paths_match() {
        let rule = match_path("/home/user/.ssh/authorized_keys").unwrap();
        assert_eq!(rule.id, "ssh-directory");
        assert!(match_path("~/.ssh/config").is_some());
    }

    #[test]
    fn test_git_config_matches() {
        assert!(match_path(".git/config").is_some());
        assert!(match_path("/repo/.git/config").is_some());
        // other .git metadata is not in the catalog
        assert!(match_path(".git/HEAD").is_none());
    }

    #[test]
    fn test_package_lock_matches() {
        let rule = match_path("package-lock.json").unwrap();
        assert_eq!(rule.severity, Severity::Medium);
    }

    #[test]
    fn test_normal_files_allowed() {
        assert!(match_path("src/index.ts").is_none());
        assert!(match_path("README.md").is_none());
        assert!(match_path("package.json").is_none());
    }
}
