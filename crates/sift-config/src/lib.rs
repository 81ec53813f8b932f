//! Configuration system for sift.
//!
//! sift uses TOML configuration files named `.sift.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.sift.toml` files
//! found, then loading `~/.sift.toml` as the global config with lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawIndexSettings, RawSearchSettings, parse_config_file, parse_config_str,
};
pub use resolve::resolve_index_dir;
use serde::{Deserialize, Serialize};
use sift_index::{KeyScheme, SearchParams};
pub use templates::{global_template, local_template};
use tracing::debug;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sift.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the generated search directory lives.
    pub index: IndexSettings,
    /// Search-related settings.
    pub search: SearchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that contributed, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        debug!(cwd = %cwd.display(), files = config_files.len(), "discovered config files");
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Search parameters derived from the `[search]` settings.
    pub fn search_params(&self) -> SearchParams {
        SearchParams {
            limit: self.search.limit,
            fuzzy_distance: self.search.fuzzy_distance,
            sections: self.search.sections.clone(),
        }
    }

    /// Serializes the effective settings to TOML, in `.sift.toml` format.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            index: SerializableIndexSettings {
                dir: self.index.dir.as_ref().map(|d| d.display().to_string()),
            },
            search: self.search.clone(),
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// The `[index]` settings.
#[derive(Debug, Clone, Default)]
pub struct IndexSettings {
    /// Resolved search directory.
    pub dir: Option<PathBuf>,
    /// Config file that set `dir`.
    pub defined_in: Option<PathBuf>,
}

/// The `[search]` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Maximum hits per query (0 = unlimited).
    pub limit: usize,
    /// Fuzzy matching Levenshtein distance (0 = disabled).
    pub fuzzy_distance: u8,
    /// How display names are reduced to keys.
    pub key_scheme: KeyScheme,
    /// Sections searched by default (empty = `all`, or every section).
    pub sections: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        let params = SearchParams::default();
        Self {
            limit: params.limit,
            fuzzy_distance: params.fuzzy_distance,
            key_scheme: KeyScheme::default(),
            sections: params.sections,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings {
    /// Index location.
    index: SerializableIndexSettings,
    /// Search settings.
    search: SearchSettings,
}

/// `[index]` with the directory rendered as a string.
#[derive(Serialize)]
struct SerializableIndexSettings {
    /// Resolved search directory, omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    dir: Option<String>,
}
