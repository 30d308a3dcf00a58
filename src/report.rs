//! Run report rendering: text banner and summary, verbose traces, JSON.

use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;

use crate::types::{BrokenKind, BrokenLink, LinkCheck, Outcome};

/// Width of the `=` and `-` rules in the text report.
const RULE_WIDTH: usize = 60;

/// Title shown in the text banner and footer.
const TITLE: &str = "Documentation Link Validation";

/// One broken link as emitted in JSON.
#[derive(Serialize)]
struct BrokenJson {
    /// Source file, relative to the repository root when possible.
    file: String,
    /// `file` or `anchor`.
    kind: &'static str,
    /// One-based line number.
    line: u32,
    /// Same text as the text report line.
    message: String,
    /// Raw target for file links, `#anchor` for anchor links.
    target: String,
    /// Display text, for file links only.
    text: Option<String>,
}

/// Top-level JSON document.
#[derive(Serialize)]
struct ReportJson<'a> {
    /// Every broken link, in scan order.
    broken: Vec<BrokenJson>,
    /// User exclusions, sorted.
    excluded: &'a [String],
    /// Number of documents scanned.
    files_scanned: usize,
    /// Number of documents with at least one broken link.
    files_with_errors: usize,
    /// No broken links were found.
    passed: bool,
}

/// Aggregated result of one run.
#[derive(Debug, Default)]
pub struct Summary {
    /// Every broken link, in file then line order.
    pub broken: Vec<BrokenLink>,
    /// User exclusions, sorted.
    pub excluded: Vec<String>,
    /// Number of documents scanned.
    pub files_scanned: usize,
    /// Number of documents with at least one broken link.
    pub files_with_errors: usize,
}

impl Summary {
    /// Whether the run found no broken links.
    pub fn passed(&self) -> bool {
        return self.broken.is_empty();
    }
}

/// Print the JSON report to stdout.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn print_json(summary: &Summary) -> Result<(), serde_json::Error> {
    println!("{}", render_json(summary)?);
    return Ok(());
}

/// Print one verbose trace line for a checked link. Broken and silently
/// skipped links produce no trace.
pub fn print_trace(check: &LinkCheck, source: &Path) {
    let label = match check.outcome {
        Outcome::SkippedExternal => "SKIP (external)",
        Outcome::ValidAnchor => "OK (anchor)",
        Outcome::ValidFile => "OK (file)",
        Outcome::Broken(_) | Outcome::SkippedInline => return,
    };
    println!(
        "  {label}: {}:{} -> {}",
        source.display(),
        check.reference.line,
        check.reference.target
    );
}

/// Render the banner, exclusion line, and file count shown before scanning.
pub fn render_header(excluded: &[String], files: usize) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("{rule}\n{TITLE}\n{rule}\n");
    if !excluded.is_empty() {
        let _ = writeln!(out, "Excluding directories: {}", excluded.join(", "));
    }
    let _ = write!(out, "\nScanning {files} documentation files...\n\n");
    return out;
}

/// Render the report as pretty JSON.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn render_json(summary: &Summary) -> Result<String, serde_json::Error> {
    let broken = summary
        .broken
        .iter()
        .map(|b| {
            let (target, text) = match &b.kind {
                BrokenKind::Anchor { anchor } => (format!("#{anchor}"), None),
                BrokenKind::File { target, text } => (target.clone(), Some(text.clone())),
            };
            return BrokenJson {
                file: b.source.display().to_string(),
                kind: b.kind.label(),
                line: b.line,
                message: b.to_string(),
                target,
                text,
            };
        })
        .collect();

    let report = ReportJson {
        broken,
        excluded: &summary.excluded,
        files_scanned: summary.files_scanned,
        files_with_errors: summary.files_with_errors,
        passed: summary.passed(),
    };
    return serde_json::to_string_pretty(&report);
}

/// Render the error list and the pass/fail footer.
pub fn render_summary(summary: &Summary) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("{}\n", "-".repeat(RULE_WIDTH));

    if summary.passed() {
        let _ = write!(
            out,
            "\nAll links valid across {} files.\n\n{rule}\nPASSED: {TITLE}\n{rule}\n",
            summary.files_scanned
        );
        return out;
    }

    let _ = write!(
        out,
        "\nFOUND {} broken link(s) in {} file(s):\n\n",
        summary.broken.len(),
        summary.files_with_errors
    );
    for broken in &summary.broken {
        let _ = writeln!(out, "  {broken}");
    }
    let _ = write!(out, "\n{rule}\nFAILED: {TITLE}\n{rule}\n");
    return out;
}
