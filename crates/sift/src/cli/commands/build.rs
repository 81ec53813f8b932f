//! Implementation of `sift build`.

use std::process::ExitCode;

use sift_index::{build_index, load_symbols};

use crate::cli::{
    args::BuildCommand,
    context::CommandContext,
    output::{dim, success},
};

/// Builds a search directory from a JSON symbol list.
pub fn run(ctx: &CommandContext, cmd: &BuildCommand) -> ExitCode {
    let scheme = ctx.key_scheme(cmd.scheme.key_scheme);

    let symbols = match load_symbols(&ctx.resolve(&cmd.symbols)) {
        Ok(symbols) => symbols,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let built = build_index(&symbols, scheme);
    let output = ctx.resolve(&cmd.output);
    let written = match built.write(&output) {
        Ok(written) => written,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for section in &built.manifest.sections {
        println!(
            "  {} {}",
            section.name,
            dim(&format!("({} files: {})", section.initials.chars().count(), section.initials))
        );
    }
    println!(
        "{} {} symbols into {} files in {}",
        success("Indexed"),
        symbols.len(),
        written.len(),
        output.display()
    );

    ExitCode::SUCCESS
}
