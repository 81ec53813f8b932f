//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use comfy_table::{Cell, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
pub use sift_highlight::{dim, emphasize_prefix, header, subheader, success, warning};
use sift_highlight::Highlighter;
use sift_index::{KeyScheme, MatchKind, SearchHit, SearchTable, derive_key, query_key};

/// JSON output for a single query's results.
#[derive(Serialize)]
struct JsonQueryResults<'a> {
    /// The original query string.
    query: &'a str,
    /// Total matches returned.
    total_matches: usize,
    /// Results for this query.
    results: &'a [SearchHit],
}

/// JSON output for `sift search`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// Results grouped by query.
    queries: Vec<JsonQueryResults<'a>>,
}

/// Results of one query.
pub struct QueryResults {
    /// The query as typed.
    pub query: String,
    /// Ranked hits.
    pub hits: Vec<SearchHit>,
}

/// Prints `text` on stdout, passing it through `highlight` when stdout is a terminal.
pub fn print_highlighted(text: &str, highlight: fn(&Highlighter, &str) -> String) {
    if io::stdout().is_terminal() {
        print!("{}", highlight(&Highlighter::new(), text));
    } else {
        print!("{text}");
    }
}

/// Pretty-prints `value` as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(mut json) => {
            json.push('\n');
            print_highlighted(&json, Highlighter::highlight_json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Byte length of the leading part of `display` covered by a prefix match on `query`.
///
/// Returns 0 when no prefix of `display` derives to a key starting with the query key.
pub fn matched_display_len(display: &str, query: &str, scheme: KeyScheme) -> usize {
    let wanted = query_key(query, scheme);
    if wanted.is_empty() {
        return 0;
    }

    display
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .find(|&end| derive_key(&display[..end], scheme).len() >= wanted.len())
        .filter(|&end| derive_key(&display[..end], scheme).starts_with(&wanted))
        .unwrap_or(0)
}

/// Formats one hit: the display name, its section and every location.
fn format_hit(hit: &SearchHit, query: &str, scheme: KeyScheme) -> String {
    let name = match hit.kind {
        MatchKind::Prefix => {
            emphasize_prefix(&hit.display, matched_display_len(&hit.display, query, scheme))
        }
        MatchKind::Fuzzy => hit.display.clone(),
    };

    let mut tag = hit.section.clone();
    if hit.kind == MatchKind::Fuzzy {
        tag.push_str(&format!(", distance {}", hit.distance));
    }

    let mut out = format!("{name} {}\n", dim(&format!("({tag})")));
    for location in &hit.locations {
        out.push_str(&format!(
            "  {}  {}\n",
            location.qualified_name,
            dim(&location.href)
        ));
    }
    out
}

/// Prints search results as text or JSON.
pub fn output_search_results(results: &[QueryResults], json: bool, scheme: KeyScheme) -> ExitCode {
    if json {
        let output = JsonSearchOutput {
            queries: results
                .iter()
                .map(|r| JsonQueryResults {
                    query: &r.query,
                    total_matches: r.hits.len(),
                    results: &r.hits,
                })
                .collect(),
        };
        return print_json(&output);
    }

    let multiple = results.len() > 1;
    for (i, result) in results.iter().enumerate() {
        if multiple {
            if i > 0 {
                println!();
            }
            println!("{}", header(&result.query));
        }

        if result.hits.is_empty() {
            println!("{}", dim("No results found."));
            continue;
        }

        for hit in &result.hits {
            print!("{}", format_hit(hit, &result.query, scheme));
        }
    }

    ExitCode::SUCCESS
}

/// Builds a terminal table with one row per location of every entry.
pub fn entries_table(table: &SearchTable) -> Table {
    let mut out = Table::new();
    out.load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Key", "Display", "Qualified name", "Link"]);

    for entry in &table.entries {
        for (i, location) in entry.locations.iter().enumerate() {
            let (key, display) = if i == 0 {
                (entry.key.as_str(), entry.display.as_str())
            } else {
                ("", "")
            };
            out.add_row(vec![
                Cell::new(key),
                Cell::new(display),
                Cell::new(location.qualified_name(&entry.display, entry.layout)),
                Cell::new(location.href.to_string()),
            ]);
        }

        if entry.locations.is_empty() {
            out.add_row(vec![
                Cell::new(&entry.key),
                Cell::new(&entry.display),
                Cell::new(""),
                Cell::new(""),
            ]);
        }
    }

    out
}
