//! Documentation file discovery across search roots.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions treated as documentation. Compared case-sensitively.
pub const DOC_EXTENSIONS: [&str; 4] = ["markdown", "md", "rst", "txt"];

/// Walk a directory root and insert every candidate document.
fn collect_from_directory(dir: &Path, repo_root: &Path, excluded: &BTreeSet<String>, found: &mut BTreeSet<PathBuf>) {
    for entry in WalkDir::new(dir) {
        let entry = match entry {
            Err(e) => {
                tracing::warn!("skipping unreadable entry: {e}");
                continue;
            },
            Ok(entry) => entry,
        };
        if entry.file_type().is_dir() {
            continue;
        }
        let path = entry.path();
        if is_candidate(path, repo_root, excluded) {
            found.insert(path.to_path_buf());
        }
    }
}

/// Collect every documentation file under the given roots, sorted and deduplicated.
///
/// File roots are taken as-is when they pass the filters; directory roots are
/// walked recursively without following symlinked directories. Roots that
/// don't exist contribute nothing.
pub fn find_documents(roots: &[PathBuf], repo_root: &Path, excluded: &BTreeSet<String>) -> Vec<PathBuf> {
    let mut found: BTreeSet<PathBuf> = BTreeSet::new();

    for root in roots {
        if root.is_file() {
            if is_candidate(root, repo_root, excluded) {
                found.insert(root.clone());
            }
        } else if root.is_dir() {
            collect_from_directory(root, repo_root, excluded, &mut found);
        } else {
            tracing::debug!(path = %root.display(), "search root matches nothing");
        }
    }

    return found.into_iter().collect();
}

/// Whether `path` has a documentation extension.
pub fn has_doc_extension(path: &Path) -> bool {
    return path
        .extension()
        .and_then(|ext| return ext.to_str())
        .is_some_and(|ext| return DOC_EXTENSIONS.contains(&ext));
}

/// Whether any path component equals an excluded directory name.
/// Components are taken relative to the repository root when the path lies under it.
fn has_excluded_component(path: &Path, repo_root: &Path, excluded: &BTreeSet<String>) -> bool {
    let relative = path.strip_prefix(repo_root).unwrap_or(path);
    return relative
        .components()
        .any(|c| return c.as_os_str().to_str().is_some_and(|name| return excluded.contains(name)));
}

/// Apply the extension, regular-file, broken-symlink, and exclusion filters.
fn is_candidate(path: &Path, repo_root: &Path, excluded: &BTreeSet<String>) -> bool {
    if !has_doc_extension(path) {
        return false;
    }
    // Follows symlinks: a dangling link has no metadata.
    let Ok(metadata) = std::fs::metadata(path) else {
        tracing::debug!(path = %path.display(), "skipping broken symlink");
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    if has_excluded_component(path, repo_root, excluded) {
        tracing::debug!(path = %path.display(), "skipping excluded path");
        return false;
    }
    return true;
}
