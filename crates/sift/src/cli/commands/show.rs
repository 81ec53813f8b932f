//! Implementation of `sift show`.

use std::process::ExitCode;

use sift_index::load_table;

use crate::cli::{
    args::ShowCommand,
    context::CommandContext,
    output::{dim, entries_table, print_json},
};

/// Renders one index file as a table or as JSON.
pub fn run(ctx: &CommandContext, cmd: &ShowCommand) -> ExitCode {
    let path = ctx.resolve(&cmd.file);
    let table = match load_table(&path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&table);
    }

    if table.is_empty() {
        println!("{}", dim("(no entries)"));
        return ExitCode::SUCCESS;
    }

    println!("{}", entries_table(&table));
    println!(
        "{}",
        dim(&format!(
            "{} entries, {} locations",
            table.len(),
            table.location_count()
        ))
    );
    ExitCode::SUCCESS
}
