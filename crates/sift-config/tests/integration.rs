//! Integration tests for sift-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge -> validate.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use sift_config::{Config, ConfigError, ConfigWarning, is_global_config};
use sift_index::KeyScheme;

/// Temporary directory tree for a test.
struct TestEnv {
    /// Owned temporary directory.
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_root_config_end_to_end() {
    let env = TestEnv::new();
    let search_dir = env.create_dir("project/doc/html/search");
    env.create_file("project/doc/html/search/all_0.js", "var searchData=\n[\n];\n");
    let config_path = env.create_file(
        "project/.sift.toml",
        r#"
root = true

[index]
dir = "doc/html/search"

[search]
limit = 7
key_scheme = "stripped"
"#,
    );
    let working_dir = env.create_dir("project/src/deep");

    let config = Config::load(&working_dir).unwrap();

    assert_eq!(config.files, vec![config_path]);
    assert_eq!(config.index.dir, Some(search_dir));
    assert_eq!(config.search.limit, 7);
    assert_eq!(config.search.key_scheme, KeyScheme::Stripped);
    assert_eq!(config.config_root, Some(env.path().join("project")));
    assert!(config.validate().is_empty());
}

#[test]
fn test_child_overrides_parent() {
    let env = TestEnv::new();
    env.create_file(
        ".sift.toml",
        "root = true\n\n[search]\nlimit = 50\nfuzzy_distance = 1\n",
    );
    env.create_file("child/.sift.toml", "[search]\nlimit = 5\n");

    let config = Config::load(&env.path().join("child")).unwrap();
    assert_eq!(config.search.limit, 5);
    assert_eq!(config.search.fuzzy_distance, 1);
    assert_eq!(config.files.len(), 2);
}

#[test]
fn test_load_without_local_config() {
    let env = TestEnv::new();
    let config = Config::load(env.path()).unwrap();

    // Only a global config can contribute here
    assert!(config.files.iter().all(|f| is_global_config(f)));
}

#[test]
fn test_parse_error_names_file() {
    let env = TestEnv::new();
    let path = env.create_file(".sift.toml", "root = true\n[search\n");

    let err = Config::load(env.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ParseToml { .. }));
    assert!(err.to_string().contains(&path.display().to_string()));
}

#[test]
fn test_validation_reports_missing_dir() {
    let env = TestEnv::new();
    env.create_file(".sift.toml", "root = true\n[index]\ndir = \"nope\"\n");

    let config = Config::load(env.path()).unwrap();
    assert_eq!(
        config.validate(),
        vec![ConfigWarning::IndexDirMissing {
            path: env.path().join("nope").display().to_string()
        }]
    );
}

#[test]
fn test_validation_without_index_dir() {
    let env = TestEnv::new();
    env.create_file(".sift.toml", "root = true\n");

    let config = Config::load(env.path()).unwrap();
    assert_eq!(config.validate(), vec![ConfigWarning::NoIndexDir]);
}

#[test]
fn test_load_from_files_explicit_order() {
    let env = TestEnv::new();
    let a = env.create_file("a.toml", "[search]\nsections = \"classes\"\n");
    let b = env.create_file("b.toml", "[search]\nsections = [\"all\"]\nlimit = 2\n");

    let config = Config::load_from_files(&[a, b]).unwrap();
    assert_eq!(config.search.sections, vec!["classes"]);
    assert_eq!(config.search.limit, 2);
}
