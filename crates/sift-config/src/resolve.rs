//! Path resolution for the configured index directory.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves an index directory setting to an absolute path.
///
/// - `~` and `~/...` expand to the home directory
/// - relative paths are resolved against `config_dir`
/// - absolute paths are returned as-is
///
/// The directory does not have to exist; validation reports that as a warning.
pub fn resolve_index_dir(path: &str, config_dir: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(path)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(config_dir.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(home_dir()?.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        let resolved = resolve_index_dir("doc/html/search", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/project/doc/html/search"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let resolved = resolve_index_dir("/srv/docs/search", Path::new("/project")).unwrap();
        assert_eq!(resolved, PathBuf::from("/srv/docs/search"));
    }

    #[test]
    fn test_resolve_tilde_path() {
        let home = BaseDirs::new().unwrap().home_dir().to_path_buf();
        let resolved = resolve_index_dir("~/docs/search", Path::new("/project")).unwrap();
        assert_eq!(resolved, home.join("docs/search"));
        assert_eq!(resolve_index_dir("~", Path::new("/project")).unwrap(), home);
    }

    #[test]
    fn test_resolve_missing_path_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let resolved = resolve_index_dir("missing", dir.path()).unwrap();
        assert!(!resolved.exists());
    }
}
