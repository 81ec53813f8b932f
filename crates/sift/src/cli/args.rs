//! Clap argument definitions for the `sift` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use sift_index::KeyScheme;

/// Parses a key scheme name.
fn parse_key_scheme(s: &str) -> Result<KeyScheme, String> {
    s.parse()
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Search, check and build documentation search indexes")]
pub struct Cli {
    /// Log more (-v for info, -vv for debug); RUST_LOG overrides
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Shared key scheme override.
#[derive(Args, Debug, Clone, Default)]
pub struct KeySchemeArgs {
    /// How display names map to keys: escaped or stripped [default: escaped]
    #[arg(long, value_parser = parse_key_scheme)]
    pub key_scheme: Option<KeyScheme>,
}

/// Arguments for `sift search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Search queries; each is matched as a key prefix
    #[arg(required = true)]
    pub queries: Vec<String>,

    /// Maximum results per query, 0 for unlimited [default: 20]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Fuzzy matching edit distance (0=prefix only, 1-2=fuzzy) [default: 0]
    #[arg(short = 'f', long)]
    pub fuzzy: Option<u8>,

    /// Restrict to a section (can be specified multiple times)
    #[arg(short = 's', long = "section")]
    pub sections: Vec<String>,

    /// Search directory to use instead of the configured one
    #[arg(long)]
    pub dir: Option<PathBuf>,

    #[command(flatten)]
    /// Key scheme override.
    pub scheme: KeySchemeArgs,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift show`.
#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    /// Index file to display
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `sift check`.
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Index files or search directories [default: the configured index directory]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    /// Key scheme override.
    pub scheme: KeySchemeArgs,
}

/// Arguments for `sift fmt`.
#[derive(Args, Debug, Clone)]
pub struct FmtCommand {
    /// Index file to format
    pub file: PathBuf,

    /// Exit with an error if the file is not in canonical form
    #[arg(long, conflicts_with = "write")]
    pub check: bool,

    /// Rewrite the file in place instead of printing it
    #[arg(long)]
    pub write: bool,
}

/// Arguments for `sift build`.
#[derive(Args, Debug, Clone)]
pub struct BuildCommand {
    /// JSON symbol list: [{"name", "href", "scope", "kind"}, ...]
    pub symbols: PathBuf,

    /// Output search directory
    #[arg(short = 'o', long)]
    pub output: PathBuf,

    #[command(flatten)]
    /// Key scheme override.
    pub scheme: KeySchemeArgs,
}

/// Arguments for `sift init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.sift.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `sift` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Look up symbols in the configured search index
    #[command(after_help = "\
MATCHING:
  Queries are normalized like index keys (lowercased, punctuation escaped)
  and matched against key prefixes. With --fuzzy, keys within the given
  edit distance of the query are listed after exact prefix matches.

EXAMPLES:
  sift search getName
  sift search get -s functions -n 5
  sift search GetModle -f 1
  sift search getUUID --json")]
    Search(SearchCommand),

    /// Render an index file as a table
    Show(ShowCommand),

    /// Validate index files and directories
    Check(CheckCommand),

    /// Re-emit an index file in canonical form
    Fmt(FmtCommand),

    /// Write a search directory from a symbol list
    Build(BuildCommand),

    /// Initialize sift configuration in current directory
    Init(InitCommand),

    /// Show configuration and index status
    Status,
}
