//! The `check` command: discover, validate, aggregate, report.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::Config;
use crate::discover;
use crate::error;
use crate::report::{self, Summary};
use crate::validator::{self, Validator};

/// Options for one validation run.
#[derive(Debug)]
pub struct CheckOptions {
    /// Extra directory names to exclude.
    pub exclude: Vec<String>,
    /// Report format.
    pub format: Format,
    /// Search roots relative to `root`. Empty means the whole repository.
    pub paths: Vec<PathBuf>,
    /// Repository root.
    pub root: PathBuf,
    /// Print a trace line for every link checked.
    pub verbose: bool,
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON on stdout.
    Json,
    /// Human-readable banner, error list, and verdict.
    #[default]
    Text,
}

/// Validate every document under the search roots and print a report.
/// Exits 0 when no broken links are found, 1 otherwise.
///
/// # Errors
///
/// Returns errors from config loading, document reading, or JSON serialization.
pub fn check(options: &CheckOptions) -> Result<ExitCode, error::Error> {
    let mut config = Config::load(&options.root)?;
    config.extend_exclusions(options.exclude.iter().cloned());

    let roots = search_roots(&options.root, &options.paths);
    let files = discover::find_documents(&roots, &options.root, &config.excluded_dirs());
    let text = options.format == Format::Text;

    let mut summary = Summary {
        excluded: config.user_exclusions().iter().cloned().collect(),
        files_scanned: files.len(),
        ..Summary::default()
    };
    if text {
        print!("{}", report::render_header(&summary.excluded, summary.files_scanned));
    }

    let validator = Validator::new()?;
    for file in &files {
        let checks = validator.validate_file(file, &options.root)?;
        if options.verbose && text {
            let source = validator::display_path(file, &options.root);
            for link in &checks {
                report::print_trace(link, &source);
            }
        }

        let broken = validator::broken_links(&checks);
        tracing::debug!(file = %file.display(), links = checks.len(), broken = broken.len(), "validated");
        if !broken.is_empty() {
            summary.files_with_errors = summary.files_with_errors.saturating_add(1);
            summary.broken.extend(broken);
        }
    }
    tracing::info!(
        files = summary.files_scanned,
        broken = summary.broken.len(),
        "link validation finished"
    );

    if text {
        print!("{}", report::render_summary(&summary));
    } else {
        report::print_json(&summary)?;
    }

    if summary.passed() {
        return Ok(ExitCode::SUCCESS);
    }
    return Ok(ExitCode::from(1));
}

/// Resolve positional paths against the repository root. No paths means the root itself.
fn search_roots(root: &Path, paths: &[PathBuf]) -> Vec<PathBuf> {
    if paths.is_empty() {
        return vec![root.to_path_buf()];
    }
    return paths
        .iter()
        .map(|p| return validator::normalize_path(&root.join(p)))
        .collect();
}
