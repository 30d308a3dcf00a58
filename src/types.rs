/// Core domain types for doclinks: link references, outcomes, and broken links.
use std::fmt;
use std::path::PathBuf;

/// The two ways a link can be broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokenKind {
    /// A same-file `#anchor` with no matching heading.
    Anchor {
        /// Anchor without the leading `#`.
        anchor: String,
    },
    /// A relative file target that exists neither beside the source nor under the root.
    File {
        /// Raw link target as written.
        target: String,
        /// Display text of the link.
        text: String,
    },
}

impl BrokenKind {
    /// Short machine-readable label for the kind.
    pub const fn label(&self) -> &'static str {
        return match self {
            Self::Anchor { .. } => "anchor",
            Self::File { .. } => "file",
        };
    }
}

/// A broken link tied back to its source file and line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Why the link is broken.
    pub kind: BrokenKind,
    /// One-based line number in the source file.
    pub line: u32,
    /// Source file, relative to the repository root when possible.
    pub source: PathBuf,
}

impl fmt::Display for BrokenLink {
    /// Render the human-readable message used in reports.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = format!("{}:{}", self.source.display(), self.line);
        return match &self.kind {
            BrokenKind::Anchor { anchor } => {
                write!(f, "{location}: broken anchor #{anchor} (heading not found)")
            },
            BrokenKind::File { target, text } => {
                write!(f, "{location}: broken link [{text}]({target}) -> file not found")
            },
        };
    }
}

/// One link checked, with the outcome of its check.
#[derive(Debug, Clone)]
pub struct LinkCheck {
    /// What happened to the link.
    pub outcome: Outcome,
    /// The link occurrence that was checked.
    pub reference: LinkReference,
}

/// Parsed from `[text](target)` syntax on a single line.
#[derive(Debug, Clone)]
pub struct LinkReference {
    /// One-based line number of the link.
    pub line: u32,
    /// Raw link target, trimmed.
    pub target: String,
    /// Display text between the brackets.
    pub text: String,
}

/// Classification of a link target. Every reference falls in exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget<'a> {
    /// `http://`, `https://`, `mailto:` or `ftp://` URL.
    External,
    /// `data:` URI or protocol-relative `//host` reference.
    Inline,
    /// Another file, with an optional trailing `#anchor`.
    RelativeFile {
        /// Fragment after the first `#`, if any.
        anchor: Option<&'a str>,
        /// File part before the first `#`.
        path: &'a str,
    },
    /// `#anchor` in the current file, or an empty target.
    SameFile {
        /// Fragment after the `#`, if any.
        anchor: Option<&'a str>,
    },
}

/// Result of checking one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The link is broken.
    Broken(BrokenLink),
    /// External URL, not checked.
    SkippedExternal,
    /// Data URI or protocol-relative reference, not checked.
    SkippedInline,
    /// Same-file anchor that matched a heading (or had nothing to check).
    ValidAnchor,
    /// Relative file that exists.
    ValidFile,
}
