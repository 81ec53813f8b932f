//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use sift_index::{MAX_FUZZY_DISTANCE, discover_index_files};

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// No index directory is configured.
    NoIndexDir,
    /// The index directory does not exist.
    IndexDirMissing {
        /// Path that doesn't exist.
        path: String,
    },
    /// The index directory exists but is not a directory.
    IndexDirNotDirectory {
        /// Path that is not a directory.
        path: String,
    },
    /// The index directory holds no `<section>_<n>.js` files.
    IndexDirEmpty {
        /// Directory that was scanned.
        path: String,
    },
    /// The fuzzy distance is above what search supports; it will be clamped.
    FuzzyDistanceTooLarge {
        /// Configured distance.
        distance: u8,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoIndexDir => write!(f, "no index directory is configured"),
            Self::IndexDirMissing { path } => {
                write!(f, "index directory does not exist: {path}")
            }
            Self::IndexDirNotDirectory { path } => {
                write!(f, "index directory is not a directory: {path}")
            }
            Self::IndexDirEmpty { path } => {
                write!(f, "index directory contains no index files: {path}")
            }
            Self::FuzzyDistanceTooLarge { distance } => write!(
                f,
                "fuzzy_distance {distance} is above the maximum of {MAX_FUZZY_DISTANCE}"
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.search.fuzzy_distance > MAX_FUZZY_DISTANCE {
        warnings.push(ConfigWarning::FuzzyDistanceTooLarge {
            distance: config.search.fuzzy_distance,
        });
    }

    let Some(dir) = &config.index.dir else {
        warnings.push(ConfigWarning::NoIndexDir);
        return warnings;
    };

    let path = dir.display().to_string();
    if !dir.exists() {
        warnings.push(ConfigWarning::IndexDirMissing { path });
    } else if !dir.is_dir() {
        warnings.push(ConfigWarning::IndexDirNotDirectory { path });
    } else if discover_index_files(dir).is_ok_and(|files| files.is_empty()) {
        warnings.push(ConfigWarning::IndexDirEmpty { path });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf};

    use super::*;
    use crate::test_support::TestDir;

    /// Builds a config pointing at `dir`.
    fn config_with_dir(dir: PathBuf) -> Config {
        let mut config = Config::default();
        config.index.dir = Some(dir);
        config
    }

    #[test]
    fn test_default_config_has_no_index_dir() {
        assert_eq!(
            validate_config(&Config::default()),
            vec![ConfigWarning::NoIndexDir]
        );
    }

    #[test]
    fn test_missing_index_dir() {
        let test_dir = TestDir::new();
        let warnings = validate_config(&config_with_dir(test_dir.path().join("missing")));
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::IndexDirMissing { .. }]
        ));
    }

    #[test]
    fn test_index_dir_is_a_file() {
        let test_dir = TestDir::new();
        let file = test_dir.create_file("search");
        let warnings = validate_config(&config_with_dir(file));
        assert!(matches!(
            warnings.as_slice(),
            [ConfigWarning::IndexDirNotDirectory { .. }]
        ));
    }

    #[test]
    fn test_index_dir_without_index_files() {
        let test_dir = TestDir::new();
        let dir = test_dir.create_dir("search");
        test_dir.create_file("search/search.js");

        let warnings = validate_config(&config_with_dir(dir.clone()));
        assert_eq!(
            warnings,
            vec![ConfigWarning::IndexDirEmpty {
                path: dir.display().to_string()
            }]
        );

        fs::write(dir.join("all_0.js"), "[]").unwrap();
        assert!(validate_config(&config_with_dir(dir)).is_empty());
    }

    #[test]
    fn test_fuzzy_distance_too_large() {
        let test_dir = TestDir::new();
        let dir = test_dir.create_dir("search");
        test_dir.create_file("search/all_0.js");

        let mut config = config_with_dir(dir);
        config.search.fuzzy_distance = 3;

        let warnings = validate_config(&config);
        assert_eq!(
            warnings,
            vec![ConfigWarning::FuzzyDistanceTooLarge { distance: 3 }]
        );
        assert_eq!(
            warnings[0].to_string(),
            "fuzzy_distance 3 is above the maximum of 2"
        );
    }
}
