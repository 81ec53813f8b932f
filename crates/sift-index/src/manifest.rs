//! The section manifest, `searchdata.js`.
//!
//! The manifest tells the search widget which sections exist, what to call them,
//! and which first characters have an index file in each section:
//!
//! ```text
//! var indexSectionsWithContent =
//! {
//!   0: "cgu",
//!   1: "g"
//! };
//!
//! var indexSectionNames =
//! {
//!   0: "all",
//!   1: "namespaces"
//! };
//!
//! var indexSectionLabels =
//! {
//!   0: "All",
//!   1: "Namespaces"
//! };
//! ```

use std::{collections::BTreeMap, fs, path::Path};

use serde::Serialize;

use crate::{
    error::{IndexError, ParseError},
    lexer::TokenKind,
    parse::Parser,
};

/// Variable holding the characters with content per section.
const WITH_CONTENT_VAR: &str = "indexSectionsWithContent";
/// Variable holding the section names.
const NAMES_VAR: &str = "indexSectionNames";
/// Variable holding the section labels.
const LABELS_VAR: &str = "indexSectionLabels";

/// One section of a search directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSection {
    /// File-name prefix (`all`, `classes`, ...).
    pub name: String,
    /// Label shown in the search widget's section menu.
    pub label: String,
    /// First key characters that have an index file, in file-number order.
    pub initials: String,
}

impl ManifestSection {
    /// Returns the file number holding keys that start with `initial`.
    pub fn file_number(&self, initial: char) -> Option<u32> {
        self.initials
            .chars()
            .position(|c| c == initial)
            .and_then(|i| u32::try_from(i).ok())
    }
}

/// The parsed content of `searchdata.js`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SectionManifest {
    /// Sections in menu order.
    pub sections: Vec<ManifestSection>,
}

impl SectionManifest {
    /// Looks up a section by name.
    pub fn section(&self, name: &str) -> Option<&ManifestSection> {
        self.sections.iter().find(|s| s.name == name)
    }
}

/// Returns the default label for a section name (`enumvalues` -> `Enumvalues`).
pub fn default_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Parses `{ 0: "a", 1: "b" }` into a number -> string map.
fn parse_string_object(parser: &mut Parser<'_>) -> Result<BTreeMap<i64, String>, ParseError> {
    parser.expect(&TokenKind::LBrace)?;

    let mut values = BTreeMap::new();
    while !parser.eat(&TokenKind::RBrace) {
        let number = parser.expect_int("section number")?;
        parser.expect(&TokenKind::Colon)?;
        let value = parser.expect_string("section value")?;
        if values.insert(number, value).is_some() {
            return Err(parser.error_here(format!("section {number} is defined twice")));
        }

        if !parser.eat(&TokenKind::Comma) {
            parser.expect(&TokenKind::RBrace)?;
            break;
        }
    }

    Ok(values)
}

/// Parses the text of `searchdata.js`.
///
/// `indexSectionNames` is required; missing labels fall back to [`default_label`] and
/// missing content strings to empty. Unknown variables are skipped.
pub fn parse_manifest(input: &str) -> Result<SectionManifest, ParseError> {
    let mut parser = Parser::new(input)?;
    let mut objects: BTreeMap<String, BTreeMap<i64, String>> = BTreeMap::new();

    while !parser.is_at_end() {
        let Some(name) = parser.parse_declaration()? else {
            return Err(parser.error_here("expected 'var' declaration"));
        };
        let values = parse_string_object(&mut parser)?;
        parser.eat(&TokenKind::Semicolon);
        objects.insert(name, values);
    }

    let Some(names) = objects.remove(NAMES_VAR) else {
        return Err(parser.error_here(format!("missing '{NAMES_VAR}'")));
    };
    let mut labels = objects.remove(LABELS_VAR).unwrap_or_default();
    let mut with_content = objects.remove(WITH_CONTENT_VAR).unwrap_or_default();

    let sections = names
        .into_iter()
        .map(|(number, name)| ManifestSection {
            label: labels
                .remove(&number)
                .unwrap_or_else(|| default_label(&name)),
            initials: with_content.remove(&number).unwrap_or_default(),
            name,
        })
        .collect();

    Ok(SectionManifest { sections })
}

/// Writes a `var <name> = { ... };` block.
fn push_object<'a>(out: &mut String, name: &str, values: impl Iterator<Item = &'a str>) {
    out.push_str("var ");
    out.push_str(name);
    out.push_str(" =\n{\n");

    let lines: Vec<String> = values
        .enumerate()
        .map(|(i, value)| {
            let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
            format!("  {i}: \"{escaped}\"")
        })
        .collect();
    out.push_str(&lines.join(",\n"));
    if !lines.is_empty() {
        out.push('\n');
    }

    out.push_str("};\n");
}

/// Serializes a manifest in the canonical `searchdata.js` layout.
pub fn emit_manifest(manifest: &SectionManifest) -> String {
    let mut out = String::new();
    push_object(
        &mut out,
        WITH_CONTENT_VAR,
        manifest.sections.iter().map(|s| s.initials.as_str()),
    );
    out.push('\n');
    push_object(
        &mut out,
        NAMES_VAR,
        manifest.sections.iter().map(|s| s.name.as_str()),
    );
    out.push('\n');
    push_object(
        &mut out,
        LABELS_VAR,
        manifest.sections.iter().map(|s| s.label.as_str()),
    );
    out
}

/// Reads and parses a `searchdata.js` file.
pub fn load_manifest(path: &Path) -> Result<SectionManifest, IndexError> {
    let content = fs::read_to_string(path).map_err(|source| IndexError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_manifest(&content).map_err(|e| IndexError::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
