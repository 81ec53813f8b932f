//! Search key derivation.
//!
//! Every entry in a search index is filed under a key derived from its display
//! name. Queries are normalized the same way so that lookups compare like with like.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// How a display name is reduced to a search key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyScheme {
    /// Lowercase, keep `[a-z0-9]`, write every other byte as `_xx` (lowercase hex).
    ///
    /// This is what documentation generators write: `Foo_Bar` becomes `foo_5fbar`.
    #[default]
    Escaped,
    /// Lowercase and drop every non-alphanumeric character: `Foo_Bar` becomes `foobar`.
    Stripped,
}

impl KeyScheme {
    /// All schemes, in declaration order.
    pub const ALL: [Self; 2] = [Self::Escaped, Self::Stripped];

    /// Returns the configuration name of this scheme.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Escaped => "escaped",
            Self::Stripped => "stripped",
        }
    }
}

impl fmt::Display for KeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown key scheme '{s}' (expected 'escaped' or 'stripped')"))
    }
}

/// Derives the search key for a display name.
pub fn derive_key(display: &str, scheme: KeyScheme) -> String {
    let lowered = display.to_lowercase();
    let mut key = String::with_capacity(lowered.len());

    for byte in lowered.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() {
            key.push(char::from(byte));
        } else if scheme == KeyScheme::Escaped {
            key.push_str(&format!("_{byte:02x}"));
        }
    }

    key
}

/// Normalizes a user query into the key space.
///
/// Surrounding whitespace is ignored; everything else is treated exactly like a
/// display name.
pub fn query_key(query: &str, scheme: KeyScheme) -> String {
    derive_key(query.trim(), scheme)
}

/// Returns the first character of a key, used to split index files.
///
/// Escaped keys that start with `_xx` are filed under `_`.
pub fn key_initial(key: &str) -> Option<char> {
    key.chars().next()
}
