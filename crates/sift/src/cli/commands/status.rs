//! Implementation of `sift status`.

use std::process::ExitCode;

use comfy_table::{Table, presets::UTF8_FULL_CONDENSED};
use sift_config::{Config, ConfigWarning, is_global_config};
use sift_highlight::{Highlighter, rule};
use sift_index::SearchIndex;

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files, effective settings, the index summary and warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.files.is_empty() {
        println!("{}", dim("No configuration files found."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("sift init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files (highest precedence first):"));
    for path in &config.files {
        let scope = if is_global_config(path) { "global" } else { "local" };
        println!("   {} {}", path.display(), dim(&format!("({scope})")));
    }
    println!();

    println!("{}", subheader("Effective settings:"));
    match config.settings_to_toml() {
        Ok(toml) => {
            println!("{}", rule(40));
            print!("{}", Highlighter::new().highlight_toml(&toml));
            println!("{}", rule(40));
        }
        Err(e) => eprintln!("error: {e}"),
    }
    println!();

    print_index_summary(config);

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints one row per section of the configured index.
fn print_index_summary(config: &Config) {
    let Some(dir) = &config.index.dir else {
        return;
    };
    if !dir.is_dir() {
        return;
    }

    let shown = config
        .config_root
        .as_deref()
        .and_then(|root| dir.strip_prefix(root).ok())
        .unwrap_or(dir);
    println!("{} {}", subheader("Index:"), dim(&shown.display().to_string()));
    let index = match SearchIndex::open(dir, config.search.key_scheme) {
        Ok(index) => index,
        Err(e) => {
            println!("   {}", warning(&e.to_string()));
            println!();
            return;
        }
    };

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["Section", "Label", "Files", "Entries"]);

    for name in index.section_names() {
        let tables = index.tables(name);
        let label = index
            .manifest()
            .and_then(|m| m.section(name))
            .map_or_else(|| "-".to_string(), |s| s.label.clone());
        let entries: usize = tables.iter().map(|t| t.len()).sum();
        table.add_row(vec![
            name.to_string(),
            label,
            tables.len().to_string(),
            entries.to_string(),
        ]);
    }

    println!("{table}");
    println!();
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoIndexDir => {
                println!("{}", dim("Hint: set [index] dir in .sift.toml"));
            }
            ConfigWarning::IndexDirMissing { .. } => {
                println!("{}", dim("Hint: run the documentation build, or `sift build`"));
            }
            _ => {}
        }
    }
}
