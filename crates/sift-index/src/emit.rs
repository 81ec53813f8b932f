//! Canonical serialization of search tables.
//!
//! The output matches what documentation generators write, so a generated file that
//! is parsed and emitted again comes back byte for byte.

use crate::model::{Layout, Location, SearchEntry, SearchTable};

/// Serializes a table in the canonical index-file layout.
///
/// ```
/// use sift_index::{emit_table, parse_table};
///
/// let source = "var searchData=\n[\n  ['get',['get',['../a.html#x',1,'ns::EA']]]\n];\n";
/// let table = parse_table(source).unwrap();
/// assert_eq!(emit_table(&table), source);
/// ```
pub fn emit_table(table: &SearchTable) -> String {
    let mut out = String::with_capacity(table.len() * 96 + 32);

    match &table.variable {
        Some(name) => {
            out.push_str("var ");
            out.push_str(name);
            out.push_str("=\n[\n");
        }
        None => out.push_str("[\n"),
    }

    for (i, entry) in table.entries.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str("  ");
        push_entry(&mut out, entry);
    }
    if !table.entries.is_empty() {
        out.push('\n');
    }

    out.push(']');
    if table.variable.is_some() {
        out.push(';');
    }
    out.push('\n');
    out
}

/// Writes one `[key,[display,...]]` entry.
fn push_entry(out: &mut String, entry: &SearchEntry) {
    out.push('[');
    push_quoted(out, &entry.key);
    out.push_str(",[");
    push_quoted(out, &entry.display);
    out.push(',');

    match written_layout(entry) {
        Layout::Generated => {
            for (i, location) in entry.locations.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_triple(out, location);
            }
        }
        Layout::Href => {
            if let Some(location) = entry.locations.first() {
                push_quoted(out, &location.href.to_string());
            }
        }
        Layout::Mapping => {
            out.push('{');
            for (i, location) in entry.locations.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                push_quoted(out, &location.scope);
                out.push(':');
                push_quoted(out, &location.href.to_string());
            }
            out.push('}');
        }
    }

    out.push_str("]]");
}

/// The layout an entry is written in.
///
/// An entry keeps its layout unless its locations cannot be expressed in it. An
/// entry without locations is written as an empty mapping. Otherwise the location
/// list is used when an href entry is not a single unscoped link, or when a
/// mapping entry has a location with a clear target flag.
fn written_layout(entry: &SearchEntry) -> Layout {
    let locations = &entry.locations;
    match entry.layout {
        _ if locations.is_empty() => Layout::Mapping,
        Layout::Href
            if locations.len() > 1
                || locations.iter().any(|l| !l.scope.is_empty() || !l.target_parent) =>
        {
            Layout::Generated
        }
        Layout::Mapping if locations.iter().any(|l| !l.target_parent) => Layout::Generated,
        layout => layout,
    }
}

/// Writes a `[href,flag,scope]` location.
fn push_triple(out: &mut String, location: &Location) {
    out.push('[');
    push_quoted(out, &location.href.to_string());
    out.push_str(if location.target_parent { ",1," } else { ",0," });
    push_quoted(out, &location.scope);
    out.push(']');
}

/// Writes a single-quoted JavaScript string literal.
fn push_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out.push('\'');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key::KeyScheme, parse::parse_table};

    #[test]
    fn empty_table() {
        assert_eq!(emit_table(&SearchTable::new(Vec::new())), "var searchData=\n[\n];\n");
        assert_eq!(emit_table(&SearchTable::default()), "[\n]\n");
    }

    #[test]
    fn generated_layout() {
        let table = SearchTable::new(vec![SearchEntry::new(
            "util",
            vec![Location::new("../namespacegtirb_1_1util.html", "gtirb")],
            KeyScheme::Escaped,
        )]);
        assert_eq!(
            emit_table(&table),
            "var searchData=\n[\n  ['util',['util',['../namespacegtirb_1_1util.html',1,'gtirb']]]\n];\n"
        );
    }

    #[test]
    fn href_and_mapping_layouts() {
        let source = "[\n  ['get',['get','../a.html#x']],\n  ['put',['put',{'a::put':'b.html#1','c::put':'d.html'}]]\n]\n";
        let table = parse_table(source).unwrap();
        assert_eq!(emit_table(&table), source);
    }

    #[test]
    fn quotes_and_backslashes_are_escaped() {
        let table = SearchTable::new(vec![SearchEntry::new(
            "it's\\",
            vec![Location::new("a.html", "")],
            KeyScheme::Escaped,
        )]);
        let emitted = emit_table(&table);
        assert!(emitted.contains(r"'it\'s\\'"));

        let reparsed = parse_table(&emitted).unwrap();
        assert_eq!(reparsed, table);

        let table = SearchTable::new(vec![SearchEntry::new(
            "line\nbreak\tand tab",
            vec![Location::new("a.html#x", "ns\r")],
            KeyScheme::Escaped,
        )]);
        let emitted = emit_table(&table);
        assert!(emitted.contains(r"'line\nbreak\tand tab'"));
        assert_eq!(emitted.lines().count(), 4);
        assert_eq!(parse_table(&emitted).unwrap(), table);
    }

    #[test]
    fn entry_without_locations_is_written_as_empty_mapping() {
        let table = SearchTable::new(vec![SearchEntry::new("x", Vec::new(), KeyScheme::Escaped)]);
        let emitted = emit_table(&table);
        assert_eq!(emitted, "var searchData=\n[\n  ['x',['x',{}]]\n];\n");

        let reparsed = parse_table(&emitted).unwrap();
        assert!(reparsed.entries[0].locations.is_empty());
        assert_eq!(reparsed.entries[0].layout, Layout::Mapping);
        assert_eq!(emit_table(&reparsed), emitted);
    }

    #[test]
    fn href_entry_with_several_locations_keeps_them_all() {
        let entry = SearchEntry::new(
            "get",
            vec![Location::new("a.html#x", "ns::A"), Location::new("b.html#y", "ns::B")],
            KeyScheme::Escaped,
        )
        .with_layout(Layout::Href);
        let emitted = emit_table(&SearchTable::new(vec![entry.clone()]));
        assert!(emitted.contains("['get',['get',['a.html#x',1,'ns::A'],['b.html#y',1,'ns::B']]]"));

        let reparsed = parse_table(&emitted).unwrap();
        assert_eq!(reparsed.entries[0].locations, entry.locations);
        assert_eq!(reparsed.entries[0].layout, Layout::Generated);
    }

    #[test]
    fn clear_target_flag_is_written_as_zero() {
        let mut location = Location::new("a.html#x", "ns");
        location.target_parent = false;
        let table = SearchTable::new(vec![SearchEntry::new("x", vec![location], KeyScheme::Escaped)]);
        assert!(emit_table(&table).contains("['a.html#x',0,'ns']"));
    }
}
