//! Structural validation of search tables.
//!
//! A table that parses can still violate the invariants the search widget relies
//! on. Validation reports those as warnings rather than errors: the table is usable,
//! but some lookups will misbehave.

use std::{collections::HashSet, fmt};

use crate::{
    key::{KeyScheme, derive_key},
    model::{Layout, SearchTable},
};

/// A non-fatal problem with a search table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableWarning {
    /// The stored key differs from the key derived from the display name.
    KeyMismatch {
        /// Entry position in the table.
        index: usize,
        /// Key as stored.
        key: String,
        /// Key derived from the display name.
        expected: String,
    },
    /// An entry has no locations.
    NoLocations {
        /// Entry position in the table.
        index: usize,
        /// Entry key.
        key: String,
    },
    /// A location's href is empty.
    EmptyHref {
        /// Entry position in the table.
        index: usize,
        /// Entry key.
        key: String,
    },
    /// A location's href ends in `#` with no anchor.
    EmptyAnchor {
        /// Entry position in the table.
        index: usize,
        /// Entry key.
        key: String,
        /// The offending href.
        href: String,
    },
    /// A mapping entry has a location without a qualified name.
    EmptyQualifiedName {
        /// Entry position in the table.
        index: usize,
        /// Entry key.
        key: String,
    },
    /// The entry's key sorts before the previous entry's key.
    UnsortedKey {
        /// Entry position in the table.
        index: usize,
        /// Entry key.
        key: String,
        /// Key of the preceding entry.
        previous: String,
    },
    /// The same key appears in more than one entry.
    DuplicateKey {
        /// Position of the repeated entry.
        index: usize,
        /// The repeated key.
        key: String,
    },
}

impl TableWarning {
    /// Position of the entry this warning is about.
    pub fn index(&self) -> usize {
        match self {
            Self::KeyMismatch { index, .. }
            | Self::NoLocations { index, .. }
            | Self::EmptyHref { index, .. }
            | Self::EmptyAnchor { index, .. }
            | Self::EmptyQualifiedName { index, .. }
            | Self::UnsortedKey { index, .. }
            | Self::DuplicateKey { index, .. } => *index,
        }
    }
}

impl fmt::Display for TableWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeyMismatch {
                index,
                key,
                expected,
            } => write!(
                f,
                "entry {index}: key '{key}' does not match display (expected '{expected}')"
            ),
            Self::NoLocations { index, key } => {
                write!(f, "entry {index}: '{key}' has no locations")
            }
            Self::EmptyHref { index, key } => {
                write!(f, "entry {index}: '{key}' has an empty href")
            }
            Self::EmptyAnchor { index, key, href } => {
                write!(f, "entry {index}: '{key}' links to '{href}' with an empty anchor")
            }
            Self::EmptyQualifiedName { index, key } => {
                write!(f, "entry {index}: '{key}' maps an empty qualified name")
            }
            Self::UnsortedKey {
                index,
                key,
                previous,
            } => write!(f, "entry {index}: key '{key}' sorts before '{previous}'"),
            Self::DuplicateKey { index, key } => {
                write!(f, "entry {index}: key '{key}' already has an entry")
            }
        }
    }
}

/// Validates a table and returns any warnings, in entry order.
///
/// This checks for:
/// - Keys that are not the reduction of their display name under `scheme`
/// - Entries without locations, or with empty hrefs, anchors or qualified names
/// - Keys out of order, and keys split across several entries
pub fn validate_table(table: &SearchTable, scheme: KeyScheme) -> Vec<TableWarning> {
    let mut warnings = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut previous: Option<&str> = None;

    for (index, entry) in table.entries.iter().enumerate() {
        let key = entry.key.clone();

        let expected = derive_key(&entry.display, scheme);
        if entry.key != expected {
            warnings.push(TableWarning::KeyMismatch {
                index,
                key: key.clone(),
                expected,
            });
        }

        if entry.locations.is_empty() {
            warnings.push(TableWarning::NoLocations {
                index,
                key: key.clone(),
            });
        }

        for location in &entry.locations {
            if location.href.document.is_empty() && location.href.anchor.is_none() {
                warnings.push(TableWarning::EmptyHref {
                    index,
                    key: key.clone(),
                });
            } else if location.href.anchor.as_deref() == Some("") {
                warnings.push(TableWarning::EmptyAnchor {
                    index,
                    key: key.clone(),
                    href: location.href.to_string(),
                });
            }
            if entry.layout == Layout::Mapping && location.scope.is_empty() {
                warnings.push(TableWarning::EmptyQualifiedName {
                    index,
                    key: key.clone(),
                });
            }
        }

        if let Some(prev) = previous
            && entry.key.as_str() < prev
        {
            warnings.push(TableWarning::UnsortedKey {
                index,
                key: key.clone(),
                previous: prev.to_string(),
            });
        }
        previous = Some(entry.key.as_str());

        if !seen.insert(entry.key.as_str()) {
            warnings.push(TableWarning::DuplicateKey { index, key });
        }
    }

    warnings
}
