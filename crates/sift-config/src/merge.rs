//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules and resolving the index directory.

use std::path::{Path, PathBuf};

use crate::{
    Config, ConfigError, IndexSettings, SearchSettings,
    parse::{RawConfig, RawSearchSettings},
    resolve::resolve_index_dir,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs are given highest precedence first (closest to the working directory) and
/// lowest precedence last (global config). For every setting the first defined value
/// wins; `sections` is replaced as a whole, never concatenated.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let index = merge_index_settings(configs)?;
    let search = merge_search_settings(configs);
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(Path::to_path_buf);

    Ok(Config {
        index,
        search,
        config_root,
        files: configs.iter().map(|c| c.path.clone()).collect(),
    })
}

/// Picks the first configured index directory, resolved against its own config file.
fn merge_index_settings(configs: &[ParsedConfig]) -> Result<IndexSettings, ConfigError> {
    for parsed in configs {
        let Some(dir) = parsed.config.index.as_ref().and_then(|i| i.dir.as_deref()) else {
            continue;
        };

        let config_dir = parsed.path.parent().unwrap_or_else(|| Path::new("."));
        return Ok(IndexSettings {
            dir: Some(resolve_index_dir(dir, config_dir)?),
            defined_in: Some(parsed.path.clone()),
        });
    }

    Ok(IndexSettings::default())
}

/// Merges search settings.
fn merge_search_settings(configs: &[ParsedConfig]) -> SearchSettings {
    let mut result = SearchSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref search) = parsed.config.search {
            apply_raw_search(&mut result, search);
        }
    }

    result
}

/// Applies raw search settings to result.
fn apply_raw_search(result: &mut SearchSettings, raw: &RawSearchSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
    if let Some(v) = raw.fuzzy_distance {
        result.fuzzy_distance = v;
    }
    if let Some(v) = raw.key_scheme {
        result.key_scheme = v;
    }
    if let Some(ref v) = raw.sections {
        result.sections.clone_from(v);
    }
}
