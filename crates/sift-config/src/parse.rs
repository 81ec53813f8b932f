//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into `RawConfig` structures whose fields are all
//! optional, so partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
use sift_index::KeyScheme;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Index location section.
    pub index: Option<RawIndexSettings>,
    /// Search settings section.
    pub search: Option<RawSearchSettings>,
}

/// Raw `[index]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawIndexSettings {
    /// Search directory, relative to the config file, absolute, or `~/`-prefixed.
    pub dir: Option<String>,
}

/// Raw `[search]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSearchSettings {
    /// Maximum hits per query (0 = unlimited).
    pub limit: Option<usize>,
    /// Fuzzy matching Levenshtein distance (0 = disabled).
    pub fuzzy_distance: Option<u8>,
    /// How display names are reduced to keys.
    pub key_scheme: Option<KeyScheme>,
    /// Sections searched by default. Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub sections: Option<Vec<String>>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.index.is_none());
        assert!(config.search.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
root = true

[index]
dir = "doc/html/search"

[search]
limit = 5
fuzzy_distance = 1
key_scheme = "stripped"
sections = ["functions", "classes"]
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
        assert_eq!(config.index.unwrap().dir.as_deref(), Some("doc/html/search"));

        let search = config.search.unwrap();
        assert_eq!(search.limit, Some(5));
        assert_eq!(search.fuzzy_distance, Some(1));
        assert_eq!(search.key_scheme, Some(KeyScheme::Stripped));
        assert_eq!(
            search.sections,
            Some(vec!["functions".to_string(), "classes".to_string()])
        );
    }

    #[test]
    fn test_parse_single_section_string() {
        let config = parse_config_str("[search]\nsections = \"functions\"\n", Path::new("t"))
            .unwrap();
        assert_eq!(
            config.search.unwrap().sections,
            Some(vec!["functions".to_string()])
        );
    }

    #[test]
    fn test_parse_unknown_key_scheme_fails() {
        let err = parse_config_str("[search]\nkey_scheme = \"soundex\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_parse_invalid_toml() {
        let result = parse_config_str("[search\nlimit = ", Path::new("test.toml"));
        assert!(matches!(result, Err(ConfigError::ParseToml { .. })));
    }

    #[test]
    fn test_parse_missing_file() {
        let result = parse_config_file(Path::new("/nonexistent/.sift.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFile { .. })));
    }

    #[test]
    fn test_is_root_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sift.toml");

        fs::write(&path, "root = true\n").unwrap();
        assert!(is_root_config(&path));

        fs::write(&path, "root = false\n").unwrap();
        assert!(!is_root_config(&path));

        fs::write(&path, "not toml [").unwrap();
        assert!(!is_root_config(&path));
    }
}
