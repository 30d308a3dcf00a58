mod anchors;
mod commands;
mod config;
mod diagnostics;
mod discover;
mod error;
mod report;
mod types;
mod validator;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use crate::commands::{CheckOptions, Format};

/// Exit code for runtime failures, distinct from "broken links found".
const RUNTIME_ERROR: u8 = 2;

/// Flags passed through to clap as-is.
const SWITCH_FLAGS: [&str; 5] = ["--help", "--verbose", "--version", "-V", "-h"];

/// Long flags that take their value from the next argument.
const VALUE_FLAGS: [&str; 3] = ["--exclude", "--format", "--root"];

#[derive(Parser)]
#[command(
    name = "doclinks",
    version,
    about = "Validate internal links and heading anchors in documentation",
    args_override_self = true
)]
struct Cli {
    /// Directory name to exclude, matched against whole path components (repeatable)
    #[arg(long, value_name = "NAME", allow_hyphen_values = true)]
    exclude: Vec<String>,

    /// Report format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Files or directories to scan, relative to the root [default: the root]
    paths: Vec<PathBuf>,

    /// Repository root
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Print every link checked (-v); repeat for debug logs on stderr
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Whether `arg` is a known flag, or `--flag=value` for a known value flag.
fn is_known_flag(arg: &str) -> bool {
    if SWITCH_FLAGS.contains(&arg) {
        return true;
    }
    if arg.strip_prefix('-').is_some_and(|rest| return !rest.is_empty() && rest.chars().all(|c| return c == 'v')) {
        return true;
    }
    return VALUE_FLAGS
        .iter()
        .any(|flag| return arg.strip_prefix(flag).is_some_and(|rest| return rest.starts_with('=')));
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(retain_known_args(std::env::args_os()));
    setup_logging(cli.verbose);

    let root = std::fs::canonicalize(&cli.root).unwrap_or(cli.root);
    let options = CheckOptions {
        exclude: cli.exclude,
        format: cli.format,
        paths: cli.paths,
        root,
        verbose: cli.verbose > 0,
    };

    return match commands::check(&options) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(RUNTIME_ERROR)
        },
    };
}

/// Drop unrecognized flags so they are ignored instead of rejected.
/// A value flag with no following argument is dropped too. Anything not
/// starting with `-` is kept as a path.
fn retain_known_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut kept: Vec<OsString> = args.next().into_iter().collect();

    while let Some(arg) = args.next() {
        let Some(text) = arg.to_str() else {
            kept.push(arg);
            continue;
        };
        if VALUE_FLAGS.contains(&text) {
            if let Some(value) = args.next() {
                kept.push(arg);
                kept.push(value);
            }
        } else if !text.starts_with('-') || is_known_flag(text) {
            kept.push(arg);
        }
    }

    return kept;
}

/// Install the stderr log subscriber. `RUST_LOG` refines the level picked by `-v` count.
fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let level = match verbosity {
        0 | 1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(false);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
