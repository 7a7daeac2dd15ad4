//! Extension source discovery
//!
//! Enumerates candidate `.ts`/`.js` files across the extension, skill, and
//! global-package search roots. Exclusion is by directory name and prunes
//! the whole subtree before descending. Missing or unreadable roots
//! contribute nothing; the walk never fails the caller.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use walkdir::WalkDir;

/// File extensions recognized as extension source.
pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "js"];

/// Directory names pruned at any depth below a search root.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &["node_modules", ".git", "dist", "build", "coverage", ".cache"];

/// Filesystem fallback used when `npm root -g` is unavailable.
pub const NPM_ROOT_FALLBACK: &str = "/usr/local/lib/node_modules";

/// Resolve the global npm package root.
///
/// Asks `npm root -g`; any failure (missing binary, non-zero exit, empty
/// output) falls back to the conventional install path so discovery of the
/// remaining roots is never aborted.
pub fn npm_global_root() -> PathBuf {
    match Command::new("npm").args(["root", "-g"]).output() {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            let trimmed = stdout.trim();
            if trimmed.is_empty() {
                PathBuf::from(NPM_ROOT_FALLBACK)
            } else {
                PathBuf::from(trimmed)
            }
        }
        _ => PathBuf::from(NPM_ROOT_FALLBACK),
    }
}

/// The built-in search roots for a project directory: the user-level
/// extension and skill directories, the project-local extension directory,
/// and the global npm root with its scoped-package subdirectories.
pub fn search_roots(project_dir: &Path) -> Vec<PathBuf> {
    let mut roots = Vec::new();

    if let Some(home) = dirs::home_dir() {
        roots.push(home.join(".pi").join("agent").join("extensions"));
        roots.push(home.join(".pi").join("agent").join("skills"));
    }
    roots.push(project_dir.join(".pi").join("extensions"));

    let npm_root = npm_global_root();
    // Scoped packages are listed as their own roots so they stay covered
    // even when the top-level listing is unreadable.
    if let Ok(entries) = std::fs::read_dir(&npm_root) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() && entry.file_name().to_string_lossy().starts_with('@') {
                roots.push(path);
            }
        }
    }
    roots.push(npm_root);

    roots
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOURCE_EXTENSIONS.contains(&ext))
        .unwrap_or(false)
}

/// Walk one root, pruning excluded directory names before descending.
///
/// The root itself is exempt from exclusion so the global npm root (itself
/// a `node_modules` directory) can be scanned.
fn walk_root(root: &Path, excluded: &HashSet<&str>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return true;
        }
        entry
            .file_name()
            .to_str()
            .map(|name| !excluded.contains(name))
            .unwrap_or(true)
    });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // unreadable entries are skipped, the walk continues
            Err(_) => continue,
        };
        if entry.file_type().is_file() && has_source_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    files
}

/// Collect all extension source files under the given roots.
///
/// Results are grouped by root traversal order and de-duplicated by path
/// (scoped-package roots overlap the npm-root walk); first occurrence wins.
pub fn collect_files(roots: &[PathBuf], excluded_dirs: &[String]) -> Vec<PathBuf> {
    let excluded: HashSet<&str> = excluded_dirs.iter().map(|s| s.as_str()).collect();

    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for root in roots {
        for file in walk_root(root, &excluded) {
            if seen.insert(file.clone()) {
                files.push(file);
            }
        }
    }
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn excluded() -> Vec<String> {
        DEFAULT_EXCLUDED_DIRS.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_collects_source_files_recursively() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();

        fs::write(root.join("index.ts"), "export {}").unwrap();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("lib/util.js"), "module.exports = {}").unwrap();
        fs::write(root.join("README.md"), "docs").unwrap();

        let files = collect_files(&[root.to_path_buf()], &excluded());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| has_source_extension(f)));
    }

    #[test]
    fn test_excluded_directory_never_descended() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();

        let nested = root.join("node_modules").join("pkg");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("evil.ts"), "eval(x)").unwrap();
        fs::write(root.join("ok.ts"), "export {}").unwrap();

        let files = collect_files(&[root.to_path_buf()], &excluded());
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("ok.ts"));
    }

    #[test]
    fn test_root_named_like_excluded_dir_still_scanned() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("node_modules");
        fs::create_dir_all(root.join("some-pkg")).unwrap();
        fs::write(root.join("some-pkg/index.js"), "module.exports = {}").unwrap();

        let files = collect_files(&[root], &excluded());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_missing_roots_yield_empty() {
        let files = collect_files(
            &[
                PathBuf::from("/nonexistent/root/one"),
                PathBuf::from("/nonexistent/root/two"),
            ],
            &excluded(),
        );
        assert!(files.is_empty());
    }

    #[test]
    fn test_duplicate_roots_deduplicated() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::write(root.join("a.ts"), "export {}").unwrap();

        let files = collect_files(&[root.to_path_buf(), root.to_path_buf()], &excluded());
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn test_search_roots_include_project_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let roots = search_roots(tmp.path());
        assert!(roots
            .iter()
            .any(|r| r.starts_with(tmp.path()) && r.ends_with(".pi/extensions")));
    }

    #[test]
    fn test_npm_global_root_never_empty() {
        let root = npm_global_root();
        assert!(!root.as_os_str().is_empty());
    }
}
