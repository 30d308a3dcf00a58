/// Crate-level error types for doclinks runtime failures.
use std::path::PathBuf;

/// Runtime failures that abort a run. Broken links are not errors: they are
/// collected as `BrokenLink` values and reported, never raised.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `.doclinks.toml` exists but cannot be parsed.
    #[error("config malformed: {}: {source}", path.display())]
    ConfigMalformed {
        /// Path to the config file.
        path: PathBuf,
        /// The wrapped TOML deserialization error.
        source: toml::de::Error,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON report serialization failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped serialization error.
        #[from]
        serde_json::Error,
    ),

    /// A built-in pattern failed to compile.
    #[error("pattern: {0}")]
    Pattern(
        /// The wrapped regex error.
        #[from]
        regex::Error,
    ),

    /// A discovered document could not be read.
    #[error("read failed: {}: {source}", path.display())]
    ReadFailed {
        /// Document that could not be read.
        path: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },
}
