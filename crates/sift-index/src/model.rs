//! Search-index data model.
//!
//! A [`SearchTable`] is the content of one generated index file: an ordered list of
//! [`SearchEntry`] records, each filing a display name under a key and pointing at
//! one or more documentation locations.

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::key::{KeyScheme, derive_key};

/// Name of the JavaScript variable generated index files assign their table to.
pub const DEFAULT_VARIABLE: &str = "searchData";

/// A link into the generated documentation: `<document>#<anchor>` or `<document>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Href {
    /// Document path relative to the search directory (e.g. `../classfoo.html`).
    pub document: String,
    /// Anchor fragment after `#`, if any.
    pub anchor: Option<String>,
}

impl Href {
    /// Creates an href from its parts.
    pub fn new(document: impl Into<String>, anchor: Option<String>) -> Self {
        Self {
            document: document.into(),
            anchor,
        }
    }

    /// Returns true when this href points at a whole document rather than an anchor.
    pub fn is_document_level(&self) -> bool {
        self.anchor.is_none()
    }
}

impl FromStr for Href {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once('#') {
            Some((document, anchor)) => Self::new(document, Some(anchor.to_string())),
            None => Self::new(s, None),
        })
    }
}

impl From<&str> for Href {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(href) => href,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for Href {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.anchor {
            Some(anchor) => write!(f, "{}#{}", self.document, anchor),
            None => f.write_str(&self.document),
        }
    }
}

impl Serialize for Href {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One place a symbol is documented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// Link to the documentation.
    pub href: Href,
    /// Enclosing scope (`gtirb::Module`, `Export.hpp`) or, for mapping entries,
    /// the qualified name the href was keyed by. Empty for top-level symbols.
    pub scope: String,
    /// Whether the search widget should open the link in the parent frame.
    #[serde(skip)]
    pub target_parent: bool,
}

impl Location {
    /// Creates a location that opens in the parent frame.
    pub fn new(href: impl Into<Href>, scope: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            scope: scope.into(),
            target_parent: true,
        }
    }

    /// Returns the fully qualified name of the symbol at this location.
    ///
    /// Mapping entries store the qualified name directly; generator entries store
    /// the enclosing scope, which is joined with the display name.
    pub fn qualified_name(&self, display: &str, layout: Layout) -> String {
        match layout {
            Layout::Mapping => self.scope.clone(),
            Layout::Href | Layout::Generated if self.scope.is_empty() => display.to_string(),
            Layout::Href | Layout::Generated => format!("{}::{}", self.scope, display),
        }
    }
}

/// The on-disk encoding of an entry's locations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `[display, [href, flag, scope], ...]` as written by documentation generators.
    #[default]
    Generated,
    /// `[display, href]`: exactly one location with no scope.
    Href,
    /// `[display, {qualifiedName: href, ...}]`.
    Mapping,
}

/// A single record of the search index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    /// Normalized lookup key.
    pub key: String,
    /// Human-readable label.
    pub display: String,
    /// Where the symbol is documented. Never empty in a well-formed table.
    pub locations: Vec<Location>,
    /// How the locations are encoded on disk.
    pub layout: Layout,
}

impl SearchEntry {
    /// Creates an entry whose key is derived from `display`.
    pub fn new(display: impl Into<String>, locations: Vec<Location>, scheme: KeyScheme) -> Self {
        let display = display.into();
        Self {
            key: derive_key(&display, scheme),
            display,
            locations,
            layout: Layout::Generated,
        }
    }

    /// Returns this entry with a different on-disk layout.
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Returns true when the entry points at more than one location.
    pub fn is_multi_location(&self) -> bool {
        self.locations.len() > 1
    }

    /// Returns true when the stored key matches the key derived from the display.
    pub fn key_matches(&self, scheme: KeyScheme) -> bool {
        self.key == derive_key(&self.display, scheme)
    }

    /// Returns the qualified names of all locations, in order.
    pub fn qualified_names(&self) -> Vec<String> {
        self.locations
            .iter()
            .map(|loc| loc.qualified_name(&self.display, self.layout))
            .collect()
    }
}

/// The content of one index file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SearchTable {
    /// JavaScript variable the table is assigned to, or `None` for a bare array.
    pub variable: Option<String>,
    /// Entries in file order.
    pub entries: Vec<SearchEntry>,
}

impl SearchTable {
    /// Creates a table assigned to the default `searchData` variable.
    pub fn new(entries: Vec<SearchEntry>) -> Self {
        Self {
            variable: Some(DEFAULT_VARIABLE.to_string()),
            entries,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of locations across all entries.
    pub fn location_count(&self) -> usize {
        self.entries.iter().map(|e| e.locations.len()).sum()
    }

    /// Returns all entries filed under exactly `key`.
    pub fn lookup<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a SearchEntry> + 'a {
        self.entries.iter().filter(move |e| e.key == key)
    }
}
