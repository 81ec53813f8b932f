//! Integration tests against a real generated index file.
//!
//! The fixture is a search-data file generated for a C++ library's API
//! documentation; it exercises parsing, validation, lookup and byte-exact
//! re-emission together.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use sift_index::{
    KeyScheme, Layout, SearchIndex, SearchParams, TableWarning, emit_table, load_table,
    parse_table, validate_table,
};

/// Generated index file for the `all` section, first letters `c`, `g` and `u`.
const FIXTURE: &str = include_str!("fixtures/all_6.js");

#[test]
fn parses_generated_file() {
    let table = parse_table(FIXTURE).unwrap();

    assert_eq!(table.variable.as_deref(), Some("searchData"));
    assert_eq!(table.len(), 30);
    assert!(table.entries.iter().all(|e| e.layout == Layout::Generated));

    let get = table.lookup("get").next().unwrap();
    assert_eq!(get.display, "get");
    assert_eq!(
        get.locations[0].href.to_string(),
        "../classgtirb_1_1_e_a.html#a8c76949b2094ba9b6e098cf2639afc03"
    );
    assert_eq!(get.locations[0].scope, "gtirb::EA");

    let namespace = table.lookup("gtirb").next().unwrap();
    assert!(namespace.locations[0].href.is_document_level());
    assert_eq!(namespace.locations[0].scope, "");
}

#[test]
fn re_emission_is_byte_identical() {
    let table = parse_table(FIXTURE).unwrap();
    let emitted = emit_table(&table);
    assert_eq!(emitted, FIXTURE);

    // And stays identical on a second pass
    assert_eq!(emit_table(&parse_table(&emitted).unwrap()), emitted);
}

#[test]
fn generated_file_is_valid_under_escaped_keys() {
    let table = parse_table(FIXTURE).unwrap();
    let warnings = validate_table(&table, KeyScheme::Escaped);
    assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
}

#[test]
fn stripped_keys_flag_escaped_entries() {
    let table = parse_table(FIXTURE).unwrap();
    let warnings = validate_table(&table, KeyScheme::Stripped);
    assert_eq!(
        warnings,
        vec![TableWarning::KeyMismatch {
            index: 28,
            key: "gtirb_5fgtirb_5fexport_5fapi".into(),
            expected: "gtirbgtirbexportapi".into(),
        }]
    );
}

#[test]
fn prefix_search_over_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("all_6.js"), FIXTURE).unwrap();
    fs::write(dir.path().join("search.js"), "function init() {}").unwrap();

    let index = SearchIndex::open(dir.path(), KeyScheme::Escaped).unwrap();
    assert_eq!(index.entry_count(), 30);

    let hits = index.search("get", &SearchParams { limit: 0, ..SearchParams::default() });
    assert_eq!(hits.len(), 26);
    assert_eq!(hits.first().unwrap().display, "get");
    assert_eq!(hits.last().unwrap().display, "getUUID");

    let hits = index.search("getLocalProperty", &SearchParams::default());
    let names: Vec<_> = hits.iter().map(|h| h.display.as_str()).collect();
    assert_eq!(
        names,
        vec!["getLocalProperty", "getLocalPropertyEmpty", "getLocalPropertySize"]
    );
    assert_eq!(
        hits[0].locations[0].qualified_name,
        "gtirb::LocalProperties::getLocalProperty"
    );
}

#[test]
fn load_table_matches_parse() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/all_6.js");
    assert_eq!(load_table(&path).unwrap(), parse_table(FIXTURE).unwrap());
}
