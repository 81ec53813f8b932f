//! Implementation of `sift search`.

use std::process::ExitCode;

use sift_index::MAX_FUZZY_DISTANCE;
use tracing::warn;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{QueryResults, output_search_results},
};

/// Looks up each query in the search index and prints the hits.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let scheme = ctx.key_scheme(cmd.scheme.key_scheme);

    let mut params = ctx.config.search_params();
    if let Some(limit) = cmd.limit {
        params.limit = limit;
    }
    if let Some(fuzzy) = cmd.fuzzy {
        params.fuzzy_distance = fuzzy;
    }
    if !cmd.sections.is_empty() {
        params.sections.clone_from(&cmd.sections);
    }
    if params.fuzzy_distance > MAX_FUZZY_DISTANCE {
        warn!(
            requested = params.fuzzy_distance,
            max = MAX_FUZZY_DISTANCE,
            "fuzzy distance clamped"
        );
    }

    let index = match ctx.open_index(cmd.dir.as_deref(), scheme) {
        Ok(index) => index,
        Err(code) => return code,
    };

    for section in &params.sections {
        if index.tables(section).is_empty() {
            eprintln!("warning: index has no section named '{section}'");
        }
    }

    let results: Vec<QueryResults> = cmd
        .queries
        .iter()
        .map(|query| QueryResults {
            query: query.clone(),
            hits: index.search(query, &params),
        })
        .collect();

    output_search_results(&results, cmd.json, scheme)
}
