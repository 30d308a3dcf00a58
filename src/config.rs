use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::Error;

/// Config file looked up in the repository root.
pub const CONFIG_FILE: &str = ".doclinks.toml";

/// Directory names never scanned: VCS metadata, caches, dependency trees, IDE state.
pub const SKIP_DIRS: [&str; 10] = [
    ".egg-info",
    ".git",
    ".idea",
    ".mypy_cache",
    ".pytest_cache",
    ".trunk",
    ".vscode",
    "__pycache__",
    "htmlcov",
    "node_modules",
];

/// Project configuration loaded from `.doclinks.toml`.
/// Exclusions are directory names matched against whole path components.
#[derive(Debug, Default)]
pub struct Config {
    /// User exclusions from the config file and the command line.
    exclude: BTreeSet<String>,
}

/// Raw TOML structure for `.doclinks.toml`.
#[derive(serde::Deserialize)]
struct DoclinksTomlConfig {
    /// Directory names to exclude.
    #[serde(default)]
    exclude: Vec<String>,
}

impl Config {
    /// Add exclusions given on the command line.
    pub fn extend_exclusions<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.exclude.extend(names);
    }

    /// Every excluded directory name: the built-in skip set plus user exclusions.
    pub fn excluded_dirs(&self) -> BTreeSet<String> {
        let mut all: BTreeSet<String> = SKIP_DIRS.iter().map(|s| return (*s).to_string()).collect();
        all.extend(self.exclude.iter().cloned());
        return all;
    }

    /// Load config from `.doclinks.toml` in the given root directory.
    /// Returns an empty config if the file doesn't exist, including when the
    /// root is not a directory at all. A file that exists
    /// but is malformed is an error, never a silent fallback.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::ConfigMalformed` if the TOML is malformed.
    pub fn load(root: &Path) -> Result<Self, Error> {
        let path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Err(e) if matches!(e.kind(), ErrorKind::NotADirectory | ErrorKind::NotFound) => {
                return Ok(Self::default());
            },
            Err(e) => return Err(Error::Io(e)),
            Ok(c) => c,
        };

        let raw: DoclinksTomlConfig =
            toml::from_str(&content).map_err(|source| return Error::ConfigMalformed { path, source })?;
        tracing::debug!(count = raw.exclude.len(), "loaded exclusions from {CONFIG_FILE}");
        return Ok(Self {
            exclude: raw.exclude.into_iter().collect(),
        });
    }

    /// User exclusions only, sorted, for the report header.
    pub const fn user_exclusions(&self) -> &BTreeSet<String> {
        return &self.exclude;
    }
}
