//! Building search directories from symbol lists.
//!
//! This is the step a documentation build performs: every documented symbol is
//! filed under its derived key in the `all` section and in the section for its
//! kind, same-key symbols are merged into one multi-location entry, and each
//! section is split into one file per first key character.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    discovery::{MANIFEST_FILENAME, discover_index_files, index_filename},
    emit::emit_table,
    error::IndexError,
    key::{KeyScheme, derive_key, key_initial},
    manifest::{ManifestSection, SectionManifest, emit_manifest},
    model::{Href, Location, SearchEntry, SearchTable},
    search::{ALL_SECTION, SearchIndex},
};

/// The kind of a documented symbol, which decides its extra section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolKind {
    /// Classes, structs and unions.
    Class,
    /// Namespaces.
    Namespace,
    /// Source files.
    File,
    /// Functions and methods.
    Function,
    /// Variables and fields.
    Variable,
    /// Type aliases.
    Typedef,
    /// Enumerations.
    Enum,
    /// Enumerators.
    #[serde(alias = "enumerator")]
    EnumValue,
    /// Preprocessor macros.
    #[serde(alias = "macro")]
    Define,
    /// Groups of related symbols.
    Group,
    /// Free-standing pages.
    Page,
}

impl SymbolKind {
    /// Section name for this kind.
    pub fn section(self) -> &'static str {
        match self {
            Self::Class => "classes",
            Self::Namespace => "namespaces",
            Self::File => "files",
            Self::Function => "functions",
            Self::Variable => "variables",
            Self::Typedef => "typedefs",
            Self::Enum => "enums",
            Self::EnumValue => "enumvalues",
            Self::Define => "defines",
            Self::Group => "groups",
            Self::Page => "pages",
        }
    }

    /// Menu label for this kind's section.
    pub fn label(self) -> &'static str {
        match self {
            Self::Class => "Classes",
            Self::Namespace => "Namespaces",
            Self::File => "Files",
            Self::Function => "Functions",
            Self::Variable => "Variables",
            Self::Typedef => "Typedefs",
            Self::Enum => "Enumerations",
            Self::EnumValue => "Enumerator",
            Self::Define => "Macros",
            Self::Group => "Modules",
            Self::Page => "Pages",
        }
    }
}

/// A documented symbol, as read from a symbol list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    /// Display name (`getName`, `gtirb::Module`).
    pub name: String,
    /// Link to its documentation.
    pub href: String,
    /// Enclosing scope; empty for top-level symbols.
    #[serde(default)]
    pub scope: String,
    /// Kind of symbol; symbols without a kind only appear in `all`.
    #[serde(default)]
    pub kind: Option<SymbolKind>,
}

/// One generated index file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFile {
    /// Section name.
    pub section: String,
    /// File number within the section.
    pub number: u32,
    /// File content.
    pub table: SearchTable,
}

impl BuiltFile {
    /// File name this table is written to.
    pub fn filename(&self) -> String {
        index_filename(&self.section, self.number)
    }
}

/// A complete generated search directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltIndex {
    /// Key scheme the index was built with.
    pub scheme: KeyScheme,
    /// Index files in section and number order.
    pub files: Vec<BuiltFile>,
    /// The matching `searchdata.js`.
    pub manifest: SectionManifest,
}

impl BuiltIndex {
    /// Writes every file and the manifest into `dir`, creating it if needed.
    ///
    /// Index files and the manifest from a previous build are removed first, so the
    /// directory holds exactly this index afterwards. Other files are left alone.
    /// Returns the paths written.
    pub fn write(&self, dir: &Path) -> Result<Vec<PathBuf>, IndexError> {
        fs::create_dir_all(dir).map_err(|source| IndexError::WriteFile {
            path: dir.to_path_buf(),
            source,
        })?;
        remove_previous_build(dir)?;

        let mut written = Vec::with_capacity(self.files.len() + 1);
        for file in &self.files {
            let path = dir.join(file.filename());
            write_file(&path, &emit_table(&file.table))?;
            written.push(path);
        }

        let manifest_path = dir.join(MANIFEST_FILENAME);
        write_file(&manifest_path, &emit_manifest(&self.manifest))?;
        written.push(manifest_path);

        info!(dir = %dir.display(), files = written.len(), "wrote search index");
        Ok(written)
    }

    /// Loads the built tables into a searchable index without touching disk.
    pub fn to_search_index(&self) -> SearchIndex {
        let mut index = SearchIndex::new(self.scheme);
        for file in &self.files {
            index.add_table(&file.section, file.table.clone());
        }
        index
    }
}

/// Deletes the index files and manifest already in `dir`.
fn remove_previous_build(dir: &Path) -> Result<(), IndexError> {
    let mut stale: Vec<PathBuf> = discover_index_files(dir)?
        .into_iter()
        .map(|file| file.path)
        .collect();
    let manifest = dir.join(MANIFEST_FILENAME);
    if manifest.is_file() {
        stale.push(manifest);
    }

    for path in &stale {
        fs::remove_file(path).map_err(|source| IndexError::RemoveFile {
            path: path.clone(),
            source,
        })?;
    }
    if !stale.is_empty() {
        debug!(dir = %dir.display(), removed = stale.len(), "removed previous build");
    }
    Ok(())
}

/// Writes `content` to `path`.
fn write_file(path: &Path, content: &str) -> Result<(), IndexError> {
    fs::write(path, content).map_err(|source| IndexError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Groups symbols by key into sorted entries.
fn section_entries(symbols: &[&Symbol], scheme: KeyScheme) -> Vec<SearchEntry> {
    let mut by_key: BTreeMap<String, SearchEntry> = BTreeMap::new();

    for symbol in symbols {
        let location = Location::new(Href::from(symbol.href.as_str()), symbol.scope.as_str());
        by_key
            .entry(derive_key(&symbol.name, scheme))
            .and_modify(|entry| entry.locations.push(location.clone()))
            .or_insert_with(|| SearchEntry::new(symbol.name.as_str(), vec![location], scheme));
    }

    by_key.into_values().collect()
}

/// Splits sorted entries into per-initial files and the section's manifest record.
fn split_section(
    section: &str,
    label: &str,
    entries: Vec<SearchEntry>,
) -> (Vec<BuiltFile>, ManifestSection) {
    let mut by_initial: BTreeMap<char, Vec<SearchEntry>> = BTreeMap::new();
    for entry in entries {
        if let Some(initial) = key_initial(&entry.key) {
            by_initial.entry(initial).or_default().push(entry);
        }
    }

    let initials: String = by_initial.keys().collect();
    let files = by_initial
        .into_values()
        .zip(0u32..)
        .map(|(entries, number)| BuiltFile {
            section: section.to_string(),
            number,
            table: SearchTable::new(entries),
        })
        .collect();

    let manifest = ManifestSection {
        name: section.to_string(),
        label: label.to_string(),
        initials,
    };
    (files, manifest)
}

/// Builds a search directory from a list of symbols.
///
/// Symbols whose name reduces to an empty key are skipped.
pub fn build_index(symbols: &[Symbol], scheme: KeyScheme) -> BuiltIndex {
    let keyed: Vec<&Symbol> = symbols
        .iter()
        .filter(|s| !derive_key(&s.name, scheme).is_empty())
        .collect();

    let mut by_kind: BTreeMap<SymbolKind, Vec<&Symbol>> = BTreeMap::new();
    for &symbol in &keyed {
        if let Some(kind) = symbol.kind {
            by_kind.entry(kind).or_default().push(symbol);
        }
    }

    let mut files = Vec::new();
    let mut manifest = SectionManifest::default();

    if !keyed.is_empty() {
        let (section_files, section) =
            split_section(ALL_SECTION, "All", section_entries(&keyed, scheme));
        files.extend(section_files);
        manifest.sections.push(section);
    }

    for (kind, members) in &by_kind {
        let (section_files, section) =
            split_section(kind.section(), kind.label(), section_entries(members, scheme));
        files.extend(section_files);
        manifest.sections.push(section);
    }

    BuiltIndex {
        scheme,
        files,
        manifest,
    }
}

/// Reads a JSON symbol list (an array of [`Symbol`] objects).
pub fn load_symbols(path: &Path) -> Result<Vec<Symbol>, IndexError> {
    let content = fs::read_to_string(path).map_err(|source| IndexError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| IndexError::Symbols {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{discovery::load_table, search::SearchParams, validate::validate_table};

    /// Creates a symbol.
    fn symbol(name: &str, href: &str, scope: &str, kind: Option<SymbolKind>) -> Symbol {
        Symbol {
            name: name.into(),
            href: href.into(),
            scope: scope.into(),
            kind,
        }
    }

    /// Symbols resembling a small C++ library.
    fn sample_symbols() -> Vec<Symbol> {
        vec![
            symbol("gtirb", "../namespacegtirb.html", "", Some(SymbolKind::Namespace)),
            symbol("getTable", "../classgtirb_1_1_node.html#a31", "gtirb::Node", Some(SymbolKind::Function)),
            symbol("get", "../classgtirb_1_1_e_a.html#a8c", "gtirb::EA", Some(SymbolKind::Function)),
            symbol("getTable", "../classgtirb_1_1_table.html#a6b", "gtirb::TableTemplate", Some(SymbolKind::Function)),
            symbol("util", "../namespacegtirb_1_1util.html", "gtirb", Some(SymbolKind::Namespace)),
            symbol("__", "../x.html", "", None),
        ]
    }

    #[test]
    fn all_section_holds_every_symbol_sorted_and_split() {
        let built = build_index(&sample_symbols(), KeyScheme::Escaped);

        let all: Vec<_> = built.files.iter().filter(|f| f.section == "all").collect();
        let names: Vec<_> = all.iter().map(|f| f.filename()).collect();
        assert_eq!(names, vec!["all_0.js", "all_1.js", "all_2.js"]);

        let keys: Vec<_> = all
            .iter()
            .flat_map(|f| f.table.entries.iter().map(|e| e.key.as_str()))
            .collect();
        assert_eq!(keys, vec!["_5f_5f", "get", "gettable", "gtirb", "util"]);
        assert_eq!(built.manifest.section("all").unwrap().initials, "_gu");
    }

    #[test]
    fn same_key_symbols_merge_into_one_entry() {
        let built = build_index(&sample_symbols(), KeyScheme::Escaped);
        let index = built.to_search_index();
        let hits = index.search("gettable", &SearchParams::default());

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].locations.len(), 2);
        assert_eq!(hits[0].locations[1].qualified_name, "gtirb::TableTemplate::getTable");
    }

    #[test]
    fn kind_sections_follow_all() {
        let built = build_index(&sample_symbols(), KeyScheme::Escaped);
        let sections: Vec<_> = built
            .manifest
            .sections
            .iter()
            .map(|s| (s.name.as_str(), s.label.as_str()))
            .collect();
        assert_eq!(
            sections,
            vec![("all", "All"), ("namespaces", "Namespaces"), ("functions", "Functions")]
        );
    }

    #[test]
    fn built_tables_validate_cleanly() {
        for scheme in KeyScheme::ALL {
            let built = build_index(&sample_symbols(), scheme);
            for file in &built.files {
                assert!(validate_table(&file.table, scheme).is_empty());
            }
        }
    }

    #[test]
    fn stripped_scheme_skips_symbols_without_alphanumerics() {
        let built = build_index(&sample_symbols(), KeyScheme::Stripped);
        let all_keys: Vec<_> = built
            .files
            .iter()
            .filter(|f| f.section == "all")
            .flat_map(|f| f.table.entries.iter().map(|e| e.key.clone()))
            .collect();
        assert!(!all_keys.iter().any(String::is_empty));
        assert_eq!(all_keys.len(), 4);
    }

    #[test]
    fn empty_symbol_list_builds_empty_index() {
        let built = build_index(&[], KeyScheme::Escaped);
        assert!(built.files.is_empty());
        assert!(built.manifest.sections.is_empty());
    }

    #[test]
    fn write_then_open_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let built = build_index(&sample_symbols(), KeyScheme::Escaped);
        let written = built.write(dir.path()).unwrap();
        assert_eq!(written.len(), built.files.len() + 1);

        let reread = load_table(&dir.path().join("all_1.js")).unwrap();
        let original = built.files.iter().find(|f| f.filename() == "all_1.js").unwrap();
        assert_eq!(reread, original.table);

        let index = SearchIndex::open(dir.path(), KeyScheme::Escaped).unwrap();
        assert_eq!(index.manifest(), Some(&built.manifest));
        assert_eq!(index.search("ut", &SearchParams::default()).len(), 1);
    }

    #[test]
    fn rebuild_replaces_previous_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("search.js"), "function searchBox() {}\n").unwrap();

        let symbols = vec![
            symbol("alpha", "a.html", "", Some(SymbolKind::Function)),
            symbol("zeta", "z.html", "", Some(SymbolKind::Function)),
        ];
        build_index(&symbols, KeyScheme::Escaped).write(dir.path()).unwrap();
        assert!(dir.path().join("all_1.js").is_file());

        build_index(&symbols[..1], KeyScheme::Escaped)
            .write(dir.path())
            .unwrap();
        assert!(!dir.path().join("all_1.js").exists());
        assert!(!dir.path().join("functions_1.js").exists());
        assert!(dir.path().join("search.js").is_file());

        let index = SearchIndex::open(dir.path(), KeyScheme::Escaped).unwrap();
        assert!(index.search("zeta", &SearchParams::default()).is_empty());
        assert_eq!(index.search("alpha", &SearchParams::default()).len(), 1);
    }

    #[test]
    fn symbols_load_from_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symbols.json");
        fs::write(
            &path,
            r#"[{"name": "get", "href": "a.html#x", "scope": "ns::EA", "kind": "function"},
                {"name": "ns", "href": "ns.html"}]"#,
        )
        .unwrap();

        let symbols = load_symbols(&path).unwrap();
        assert_eq!(symbols.len(), 2);
        assert_eq!(symbols[0].kind, Some(SymbolKind::Function));
        assert_eq!(symbols[1].scope, "");
        assert_eq!(symbols[1].kind, None);
    }

    #[test]
    fn invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("symbols.json");
        fs::write(&path, "{").unwrap();
        assert!(matches!(load_symbols(&path), Err(IndexError::Symbols { .. })));
    }
}
