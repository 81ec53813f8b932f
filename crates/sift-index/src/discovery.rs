//! Index-file discovery and loading.
//!
//! Generated search directories hold one file per section and first key character,
//! named `<section>_<n>.js` (`all_0.js`, `functions_6.js`, ...), next to the widget
//! script `search.js` and the section manifest `searchdata.js`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;
use walkdir::WalkDir;

use crate::{error::IndexError, model::SearchTable, parse::parse_table};

/// File name of the section manifest.
pub const MANIFEST_FILENAME: &str = "searchdata.js";

/// A discovered index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexFile {
    /// Path to the file.
    pub path: PathBuf,
    /// Section name (`all`, `classes`, `functions`, ...).
    pub section: String,
    /// File number within the section.
    pub number: u32,
}

/// Splits an index-file name into section and number.
///
/// Returns `None` for anything that is not `<section>_<hex>.js`.
pub fn parse_index_filename(name: &str) -> Option<(String, u32)> {
    let stem = name.strip_suffix(".js")?;
    let (section, number) = stem.rsplit_once('_')?;

    if section.is_empty()
        || !section
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        || number.is_empty()
    {
        return None;
    }

    let number = u32::from_str_radix(number, 16).ok()?;
    Some((section.to_string(), number))
}

/// Formats the file name for a section and number.
pub fn index_filename(section: &str, number: u32) -> String {
    format!("{section}_{number:x}.js")
}

/// Finds all index files directly inside `dir`, sorted by section then number.
pub fn discover_index_files(dir: &Path) -> Result<Vec<IndexFile>, IndexError> {
    if !dir.is_dir() {
        return Err(IndexError::MissingDirectory(dir.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| IndexError::walk(&e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if let Some((section, number)) = parse_index_filename(name) {
            files.push(IndexFile {
                path: entry.into_path(),
                section,
                number,
            });
        }
    }

    files.sort_by(|a, b| (&a.section, a.number).cmp(&(&b.section, b.number)));
    debug!(dir = %dir.display(), count = files.len(), "discovered index files");
    Ok(files)
}

/// Reads and parses one index file.
pub fn load_table(path: &Path) -> Result<SearchTable, IndexError> {
    let content = fs::read_to_string(path).map_err(|source| IndexError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let table = parse_table(&content).map_err(|source| IndexError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), entries = table.len(), "loaded index file");
    Ok(table)
}
