//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use sift_config::{CONFIG_FILENAME, Config};
use sift_index::{KeyScheme, SearchIndex};
use tracing::info;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used by `init`, which must work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Key scheme from the override, falling back to configuration.
    pub fn key_scheme(&self, scheme_override: Option<KeyScheme>) -> KeyScheme {
        scheme_override.unwrap_or(self.config.search.key_scheme)
    }

    /// Resolves a path given on the command line against the working directory.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    /// Returns the search directory from the override or configuration.
    pub fn index_dir(&self, dir_override: Option<&Path>) -> Result<PathBuf, ExitCode> {
        if let Some(dir) = dir_override {
            return Ok(self.resolve(dir));
        }

        self.config.index.dir.clone().ok_or_else(|| {
            eprintln!("error: no index directory configured");
            eprintln!("Run 'sift init' to create a {CONFIG_FILENAME}, or pass --dir.");
            ExitCode::FAILURE
        })
    }

    /// Opens the search directory, exiting with a consistent error on failure.
    pub fn open_index(
        &self,
        dir_override: Option<&Path>,
        scheme: KeyScheme,
    ) -> Result<SearchIndex, ExitCode> {
        let dir = self.index_dir(dir_override)?;
        let index = SearchIndex::open(&dir, scheme).map_err(|e| {
            eprintln!("error: failed to open index: {e}");
            ExitCode::FAILURE
        })?;

        info!(dir = %dir.display(), entries = index.entry_count(), "index opened");
        Ok(index)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
