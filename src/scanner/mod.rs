//! Static pattern analyzer for extension sources
//!
//! Reads each discovered file, applies the code-execution and
//! prompt-injection catalogs line by line, and produces severity-ranked
//! findings. Matching is deliberately line-scoped: line numbers stay exact
//! and a rule never matches across line boundaries.

pub mod discovery;

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::rules::{Category, Rule, Severity, CODE_EXECUTION_RULES, PROMPT_INJECTION_RULES};

/// One rule match against one line of a scanned file
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub rule_id: &'static str,
    pub severity: Severity,
    pub category: Category,
    pub description: &'static str,

    /// 1-based line number of the matched line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Finding {
    fn from_rule(rule: &'static Rule, line: usize) -> Self {
        Self {
            rule_id: rule.id,
            severity: rule.severity,
            category: rule.category,
            description: rule.description,
            line: Some(line),
        }
    }
}

/// Findings for a single analyzed file, sorted severity-descending
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub findings: Vec<Finding>,
}

impl FileReport {
    /// Highest severity among this file's findings
    pub fn max_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

/// Per-severity finding counts
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SeverityTally {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl SeverityTally {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }
}

/// Aggregated result of a full scan. Recomputed on every run, never
/// persisted.
#[derive(Debug, Default, Serialize)]
pub struct ScanReport {
    /// Files with at least one finding, ordered by max severity descending
    pub files: Vec<FileReport>,

    pub files_scanned: usize,
    pub files_skipped: usize,
    pub tally: SeverityTally,
}

impl ScanReport {
    pub fn files_with_findings(&self) -> usize {
        self.files.len()
    }

    pub fn total_findings(&self) -> usize {
        self.tally.total()
    }
}

/// Analyze source content line by line against both static catalogs.
///
/// Every (line, rule) match yields one finding; a line may accumulate
/// several findings and a rule may fire on many lines. Findings are
/// returned severity-descending with catalog order breaking ties.
pub fn analyze_source(content: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_number = idx + 1;
        for rule in CODE_EXECUTION_RULES.matches(line) {
            findings.push(Finding::from_rule(rule, line_number));
        }
        for rule in PROMPT_INJECTION_RULES.matches(line) {
            findings.push(Finding::from_rule(rule, line_number));
        }
    }

    // stable sort: equal severities keep line/catalog order
    findings.sort_by(|a, b| b.severity.cmp(&a.severity));
    findings
}

/// Analyze a single file. Read errors propagate to the caller, which
/// skips the file and continues the batch.
pub fn analyze_file(path: &Path) -> io::Result<FileReport> {
    let content = std::fs::read_to_string(path)?;
    Ok(FileReport {
        path: path.to_path_buf(),
        findings: analyze_source(&content),
    })
}

/// Scan every source file under the given roots.
pub fn scan_roots(roots: &[PathBuf], excluded_dirs: &[String]) -> ScanReport {
    let mut report = ScanReport::default();

    for path in discovery::collect_files(roots, excluded_dirs) {
        match analyze_file(&path) {
            Ok(file_report) => {
                report.files_scanned += 1;
                if !file_report.findings.is_empty() {
                    for finding in &file_report.findings {
                        report.tally.record(finding.severity);
                    }
                    report.files.push(file_report);
                }
            }
            Err(e) => {
                // a vanished or unreadable file never fails the batch
                eprintln!("Warning: skipping {}: {}", path.display(), e);
                report.files_skipped += 1;
            }
        }
    }

    report
        .files
        .sort_by(|a, b| b.max_severity().cmp(&a.max_severity()));
    report
}

/// Run discovery and analysis over the built-in roots plus any configured
/// extras.
pub fn scan_all(project_dir: &Path, config: &Config) -> ScanReport {
    let mut roots = discovery::search_roots(project_dir);
    roots.extend(config.scan.extra_roots.iter().map(|p| Config::expand_path(p)));
    scan_roots(&roots, &config.scan.exclude_dirs)
}

/// Render a scan report for terminal output.
pub fn render_report(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Scanned {} extension files: {} with findings, {} findings total",
        report.files_scanned,
        report.files_with_findings(),
        report.total_findings(),
    );
    if report.files_skipped > 0 {
        let _ = writeln!(out, "Skipped {} unreadable files", report.files_skipped);
    }

    if report.files.is_empty() {
        let _ = writeln!(out, "No risk patterns detected.");
        return out;
    }

    let counts: Vec<String> = Severity::ALL
        .iter()
        .filter(|s| report.tally.count(**s) > 0)
        .map(|s| format!("{}: {}", s, report.tally.count(*s)))
        .collect();
    let _ = writeln!(out, "{}", counts.join("  "));

    for file in &report.files {
        let _ = writeln!(out, "\n{}", file.path.display());
        for finding in &file.findings {
            let location = match finding.line {
                Some(line) => format!(" (line {})", line),
                None => String::new(),
            };
            let _ = writeln!(
                out,
                "  [{}] {}: {}{}",
                finding.severity, finding.category, finding.description, location
            );
        }
    }

    out
}
