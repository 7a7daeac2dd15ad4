//! Code-execution rules for extension source scanning
//!
//! Targets JavaScript/TypeScript constructs that build and run code from
//! strings. Plain `fetch`/http-library calls and `spawn`/`execFile` with
//! static arguments are deliberately not flagged: they are too common in
//! legitimate extensions to be useful signals.

use crate::rules::{Category, Rule, Severity};

pub const RULES: &[Rule] = &[
    // Direct string-to-code execution
    Rule::new(
        "eval-call",
        r"\beval\s*\(",
        "Direct execution of code from a string via eval()",
        Severity::High,
        Category::CodeExecution,
    ),
    Rule::new(
        "function-constructor",
        r"\bnew\s+Function\s*\(",
        "Dynamic function construction from strings",
        Severity::High,
        Category::CodeExecution,
    ),
    Rule::new(
        "vm-context-execution",
        r"\bvm\.runIn\w*Context\s*\(",
        "Code execution inside a vm context",
        Severity::High,
        Category::CodeExecution,
    ),
    // Shell execution with interpolated command strings
    Rule::new(
        "exec-template-interpolation",
        r"\bexec(Sync)?\s*\(\s*`[^`]*\$\{",
        "Shell command built from an interpolated template string",
        Severity::Medium,
        Category::CodeExecution,
    ),
    Rule::new(
        "exec-string-concat",
        r"\bexec(Sync)?\s*\(\s*['\x22][^'\x22]*['\x22]\s*\+",
        "Shell command built by string concatenation",
        Severity::Medium,
        Category::CodeExecution,
    ),
    // Recursive destructive filesystem deletion
    Rule::new(
        "fs-recursive-delete",
        r"\b(rm|rmSync|rmdir|rmdirSync)\s*\([^)]*recursive\s*:\s*true",
        "Recursive filesystem deletion call",
        Severity::Low,
        Category::CodeExecution,
    ),
    Rule::new(
        "rimraf-call",
        r"\brimraf\s*\(",
        "Recursive deletion via rimraf",
        Severity::Low,
        Category::CodeExecution,
    ),
];
