use std::path::Path;

use crate::config::CONFIG_FILE;
use crate::error::Error;

/// ANSI bold on.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
}

/// Render a malformed config diagnostic.
fn render_config_malformed(path: &Path, reason: &str) -> String {
    return format!(
        "\
# Error: Invalid Config

`{}` could not be parsed:

{reason}

## Fix

The file takes a single list of directory names:

    exclude = [\"templates\", \"history\"]

Or delete `{CONFIG_FILE}` to use the built-in skip set only.
",
        path.display()
    );
}

/// Render a runtime error as a structured markdown diagnostic:
/// what happened and, where there is one, how to fix it.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::ConfigMalformed { path, source } => render_config_malformed(path, &source.to_string()),
        Error::Io(e) => format!(
            "\
# Error: I/O

{e}
"
        ),
        Error::Json(e) => format!(
            "\
# Error: JSON Report

{e}
"
        ),
        Error::Pattern(e) => format!(
            "\
# Error: Invalid Pattern

{e}
"
        ),
        Error::ReadFailed { path, source } => render_read_failed(path, &source.to_string()),
    };
}

/// Render an unreadable document diagnostic.
fn render_read_failed(path: &Path, reason: &str) -> String {
    return format!(
        "\
# Error: Unreadable Document

Could not read `{}`: {reason}

## Fix

Check the file's permissions, or exclude its directory:

    doclinks --exclude <dir>
",
        path.display()
    );
}
