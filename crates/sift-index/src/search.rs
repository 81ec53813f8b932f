//! Prefix and fuzzy lookup over loaded search tables.
//!
//! Lookup works like the documentation search widget: the query is normalized into
//! the key space and every entry whose key starts with it is a match. Optionally,
//! keys within a small edit distance of the query are matched too, using a
//! Levenshtein prefix automaton.

use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashSet},
    path::Path,
};

use levenshtein_automata::{Distance, LevenshteinAutomatonBuilder};
use serde::Serialize;
use tracing::debug;

use crate::{
    discovery::{MANIFEST_FILENAME, discover_index_files, load_table},
    error::IndexError,
    key::{KeyScheme, query_key},
    manifest::{SectionManifest, load_manifest},
    model::{SearchEntry, SearchTable},
};

/// Section that holds every symbol in generated search directories.
pub const ALL_SECTION: &str = "all";

/// Largest supported fuzzy edit distance.
pub const MAX_FUZZY_DISTANCE: u8 = 2;

/// Parameters for a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum number of hits to return (0 = unlimited).
    pub limit: usize,
    /// Levenshtein distance for fuzzy matching (0 = prefix matching only).
    pub fuzzy_distance: u8,
    /// Sections to search. Empty means `all` when present, otherwise every section.
    pub sections: Vec<String>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            limit: 20,
            fuzzy_distance: 0,
            sections: Vec::new(),
        }
    }
}

/// How a hit matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    /// The key starts with the normalized query.
    Prefix,
    /// A prefix of the key is within the fuzzy distance of the query.
    Fuzzy,
}

/// One location of a hit, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HitLocation {
    /// Link to the documentation.
    pub href: String,
    /// Fully qualified symbol name.
    pub qualified_name: String,
}

/// A search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    /// Section the entry was found in.
    pub section: String,
    /// Entry key.
    pub key: String,
    /// Entry display name.
    pub display: String,
    /// Where the symbol is documented.
    pub locations: Vec<HitLocation>,
    /// How the entry matched.
    pub kind: MatchKind,
    /// Edit distance of the match (0 for prefix matches).
    pub distance: u8,
}

impl SearchHit {
    /// Builds a hit from a table entry.
    fn from_entry(section: &str, entry: &SearchEntry, kind: MatchKind, distance: u8) -> Self {
        Self {
            section: section.to_string(),
            key: entry.key.clone(),
            display: entry.display.clone(),
            locations: entry
                .locations
                .iter()
                .map(|loc| HitLocation {
                    href: loc.href.to_string(),
                    qualified_name: loc.qualified_name(&entry.display, entry.layout),
                })
                .collect(),
            kind,
            distance,
        }
    }

    /// Ordering: prefix hits by key, then fuzzy hits by distance and key.
    fn rank_cmp(&self, other: &Self) -> Ordering {
        (self.kind == MatchKind::Fuzzy)
            .cmp(&(other.kind == MatchKind::Fuzzy))
            .then(self.distance.cmp(&other.distance))
            .then_with(|| self.key.cmp(&other.key))
            .then_with(|| self.display.cmp(&other.display))
            .then_with(|| self.section.cmp(&other.section))
    }
}

/// The loaded tables of a search directory.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    /// Key scheme queries are normalized with.
    scheme: KeyScheme,
    /// Tables per section name.
    sections: BTreeMap<String, Vec<SearchTable>>,
    /// Section manifest, when the directory has one.
    manifest: Option<SectionManifest>,
}

impl SearchIndex {
    /// Creates an empty index.
    pub fn new(scheme: KeyScheme) -> Self {
        Self {
            scheme,
            sections: BTreeMap::new(),
            manifest: None,
        }
    }

    /// Loads every index file in `dir`, plus `searchdata.js` if present.
    pub fn open(dir: &Path, scheme: KeyScheme) -> Result<Self, IndexError> {
        let mut index = Self::new(scheme);

        for file in discover_index_files(dir)? {
            let table = load_table(&file.path)?;
            index.add_table(&file.section, table);
        }

        let manifest_path = dir.join(MANIFEST_FILENAME);
        if manifest_path.is_file() {
            index.manifest = Some(load_manifest(&manifest_path)?);
        }

        debug!(
            dir = %dir.display(),
            sections = index.sections.len(),
            entries = index.entry_count(),
            "opened search index"
        );
        Ok(index)
    }

    /// Adds a table to a section.
    pub fn add_table(&mut self, section: &str, table: SearchTable) {
        self.sections
            .entry(section.to_string())
            .or_default()
            .push(table);
    }

    /// Key scheme used to normalize queries.
    pub fn scheme(&self) -> KeyScheme {
        self.scheme
    }

    /// Section manifest, if one was loaded.
    pub fn manifest(&self) -> Option<&SectionManifest> {
        self.manifest.as_ref()
    }

    /// Section names in sorted order.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Tables of one section.
    pub fn tables(&self, section: &str) -> &[SearchTable] {
        self.sections.get(section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.values().flatten().map(SearchTable::len).sum()
    }

    /// Returns true when no tables are loaded.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Resolves which sections a search covers.
    fn target_sections<'a>(&'a self, params: &'a SearchParams) -> Vec<&'a str> {
        if !params.sections.is_empty() {
            return params.sections.iter().map(String::as_str).collect();
        }
        if self.sections.contains_key(ALL_SECTION) {
            return vec![ALL_SECTION];
        }
        self.section_names().collect()
    }

    /// Looks up `query`, returning prefix hits by key followed by fuzzy hits.
    ///
    /// An empty (or all-whitespace) query matches nothing.
    pub fn search(&self, query: &str, params: &SearchParams) -> Vec<SearchHit> {
        let normalized = query_key(query, self.scheme);
        if normalized.is_empty() {
            return Vec::new();
        }

        let distance = params.fuzzy_distance.min(MAX_FUZZY_DISTANCE);
        let dfa = (distance > 0)
            .then(|| LevenshteinAutomatonBuilder::new(distance, true).build_prefix_dfa(&normalized));

        let mut seen: HashSet<(&str, &str, &str)> = HashSet::new();
        let mut hits = Vec::new();

        for section in self.target_sections(params) {
            for entry in self.tables(section).iter().flat_map(|t| &t.entries) {
                if !seen.insert((section, entry.key.as_str(), entry.display.as_str())) {
                    continue;
                }

                if entry.key.starts_with(&normalized) {
                    hits.push(SearchHit::from_entry(section, entry, MatchKind::Prefix, 0));
                } else if let Some(dfa) = &dfa
                    && let Distance::Exact(d) = dfa.eval(&entry.key)
                {
                    hits.push(SearchHit::from_entry(section, entry, MatchKind::Fuzzy, d));
                }
            }
        }

        hits.sort_by(SearchHit::rank_cmp);
        if params.limit > 0 {
            hits.truncate(params.limit);
        }

        debug!(query, normalized = %normalized, hits = hits.len(), "search complete");
        hits
    }
}
