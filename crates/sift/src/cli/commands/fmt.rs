//! Implementation of `sift fmt`.

use std::{fs, process::ExitCode};

use sift_highlight::Highlighter;
use sift_index::{emit_table, parse_table};
use tracing::debug;

use crate::cli::{
    args::FmtCommand,
    context::CommandContext,
    output::{dim, print_highlighted, success, warning},
};

/// Re-emits an index file in canonical form.
///
/// Prints the canonical text by default, rewrites the file with `--write`, and with
/// `--check` only reports whether the file is already canonical.
pub fn run(ctx: &CommandContext, cmd: &FmtCommand) -> ExitCode {
    let path = ctx.resolve(&cmd.file);
    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: failed to read {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let table = match parse_table(&source) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("error: {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let canonical = emit_table(&table);
    let unchanged = canonical == source;
    debug!(path = %path.display(), unchanged, "formatted index file");

    if cmd.check {
        if unchanged {
            println!("{} {}", success("ok"), path.display());
            return ExitCode::SUCCESS;
        }
        println!("{} {}", warning("would reformat"), path.display());
        return ExitCode::FAILURE;
    }

    if cmd.write {
        if unchanged {
            println!("{} {}", dim("unchanged"), path.display());
            return ExitCode::SUCCESS;
        }
        if let Err(e) = fs::write(&path, &canonical) {
            eprintln!("error: failed to write {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
        println!("{} {}", success("formatted"), path.display());
        return ExitCode::SUCCESS;
    }

    print_highlighted(&canonical, Highlighter::highlight_js);
    ExitCode::SUCCESS
}
