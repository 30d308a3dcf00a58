use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use regex::{Captures, Regex};

use crate::anchors;
use crate::error::Error;
use crate::types::{BrokenKind, BrokenLink, LinkCheck, LinkReference, LinkTarget, Outcome};

/// URL schemes that are never validated.
const EXTERNAL_PREFIXES: [&str; 4] = ["http://", "https://", "mailto:", "ftp://"];

/// Inline `data:` URIs and protocol-relative references, skipped silently.
const INLINE_PREFIXES: [&str; 2] = ["data:", "//"];

/// `[text](target)`: text may be empty, target may not. No nesting, no reference-style links.
const LINK_PATTERN: &str = r"\[([^\]]*)\]\(([^)]+)\)";

/// Compiled patterns, built once per run and shared by every file.
pub struct Validator {
    /// ATX heading pattern.
    headings: Regex,
    /// Inline link pattern.
    links: Regex,
}

impl Validator {
    /// Check every link in `content`, which was read from `file`.
    /// Results follow line order, then left-to-right order within a line.
    pub fn check_content(&self, content: &str, file: &Path, repo_root: &Path) -> Vec<LinkCheck> {
        let anchors = anchors::extract_anchors(content, &self.headings);
        let source = display_path(file, repo_root);
        let file_dir = file.parent().unwrap_or_else(|| return Path::new(""));

        let mut checks = Vec::new();
        for (idx, line) in anchors::split_lines(content).into_iter().enumerate() {
            let line_num = u32::try_from(idx.saturating_add(1)).unwrap_or(u32::MAX);
            for cap in self.links.captures_iter(line) {
                let Some(reference) = parse_link_capture(&cap, line_num) else {
                    continue;
                };
                let outcome = check_reference(&reference, &anchors, &source, file_dir, repo_root);
                checks.push(LinkCheck { outcome, reference });
            }
        }
        return checks;
    }

    /// Compile the heading and link patterns.
    ///
    /// # Errors
    ///
    /// Returns `Error::Pattern` if a pattern fails to compile.
    pub fn new() -> Result<Self, Error> {
        return Ok(Self {
            headings: anchors::heading_pattern()?,
            links: Regex::new(LINK_PATTERN)?,
        });
    }

    /// Read `file` and check every link in it. Invalid UTF-8 is replaced, not rejected.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReadFailed` if the file cannot be read.
    pub fn validate_file(&self, file: &Path, repo_root: &Path) -> Result<Vec<LinkCheck>, Error> {
        let bytes = std::fs::read(file).map_err(|source| {
            return Error::ReadFailed {
                path: file.to_path_buf(),
                source,
            };
        })?;
        let content = String::from_utf8_lossy(&bytes);
        return Ok(self.check_content(&content, file, repo_root));
    }
}

/// Keep only the broken links, in check order.
pub fn broken_links(checks: &[LinkCheck]) -> Vec<BrokenLink> {
    return checks
        .iter()
        .filter_map(|check| {
            return match &check.outcome {
                Outcome::Broken(broken) => Some(broken.clone()),
                _ => None,
            };
        })
        .collect();
}

/// Decide the outcome of one reference.
fn check_reference(
    reference: &LinkReference,
    anchors: &HashSet<String>,
    source: &Path,
    file_dir: &Path,
    repo_root: &Path,
) -> Outcome {
    let broken = |kind: BrokenKind| {
        return Outcome::Broken(BrokenLink {
            kind,
            line: reference.line,
            source: source.to_path_buf(),
        });
    };

    return match classify_target(&reference.target) {
        LinkTarget::External => Outcome::SkippedExternal,
        LinkTarget::Inline => Outcome::SkippedInline,
        LinkTarget::RelativeFile { anchor, path } => {
            if let Some(anchor) = anchor {
                tracing::trace!(file = path, anchor, "anchor in another file is not checked");
            }
            if target_file_exists(path, file_dir, repo_root) {
                Outcome::ValidFile
            } else {
                broken(BrokenKind::File {
                    target: reference.target.clone(),
                    text: reference.text.clone(),
                })
            }
        },
        LinkTarget::SameFile { anchor } => match anchor {
            Some(anchor) if !anchor.is_empty() && !anchors.contains(anchor) => broken(BrokenKind::Anchor {
                anchor: anchor.to_string(),
            }),
            _ => Outcome::ValidAnchor,
        },
    };
}

/// Classify a trimmed link target. Splits on the first `#` only.
pub fn classify_target(target: &str) -> LinkTarget<'_> {
    if EXTERNAL_PREFIXES.iter().any(|p| return target.starts_with(p)) {
        return LinkTarget::External;
    }
    if INLINE_PREFIXES.iter().any(|p| return target.starts_with(p)) {
        return LinkTarget::Inline;
    }

    let (path, anchor) = match target.split_once('#') {
        None => (target, None),
        Some((path, anchor)) => (path, Some(anchor)),
    };

    if path.is_empty() {
        return LinkTarget::SameFile { anchor };
    }
    return LinkTarget::RelativeFile { anchor, path };
}

/// Path shown in reports: relative to the repository root when possible.
pub fn display_path(file: &Path, repo_root: &Path) -> PathBuf {
    return file.strip_prefix(repo_root).unwrap_or(file).to_path_buf();
}

/// Collapse `.` and `..` components in a path without touching the filesystem.
/// Preserves leading `..` when there is nothing left to pop, and never pops the root.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        push_normalized_component(&mut components, component);
    }
    return components.iter().collect();
}

/// Turn a regex capture into a link reference. Returns `None` if a group is missing.
fn parse_link_capture(cap: &Captures<'_>, line: u32) -> Option<LinkReference> {
    let text = cap.get(1)?.as_str();
    let target = cap.get(2)?.as_str().trim();
    return Some(LinkReference {
        line,
        target: target.to_string(),
        text: text.to_string(),
    });
}

/// Handle a single path component during normalization.
/// Pops the last normal component for `..`, preserves it otherwise.
fn push_normalized_component<'a>(components: &mut Vec<Component<'a>>, component: Component<'a>) {
    match component {
        Component::CurDir => {},
        Component::ParentDir => {
            if matches!(components.last(), Some(Component::Normal(_))) {
                components.pop();
            } else if !matches!(components.last(), Some(Component::RootDir | Component::Prefix(_))) {
                components.push(component);
            }
        },
        other => components.push(other),
    }
}

/// Whether a file target exists beside the source file or under the repository root.
/// A leading `/` is read as root-relative for the root lookup.
fn target_file_exists(target: &str, file_dir: &Path, repo_root: &Path) -> bool {
    let beside_source = normalize_path(&file_dir.join(target));
    if beside_source.exists() {
        return true;
    }
    let from_root = normalize_path(&repo_root.join(target.trim_start_matches('/')));
    return from_root.exists();
}
