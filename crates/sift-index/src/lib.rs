//! Documentation search-index parsing, validation and lookup for sift.
//!
//! Documentation generators ship a client-side search widget together with a set of
//! generated data files: small JavaScript programs that assign a table of
//! `[key, [display, locations...]]` entries to a variable. This crate handles:
//! - Parsing those files into a typed [`SearchTable`] model, with positioned errors
//! - Emitting tables back in the canonical layout (parse then emit is byte-identical)
//! - Deriving and checking search keys, and validating table invariants
//! - Prefix and fuzzy lookup across the sections of a search directory
//! - Building complete search directories, including `searchdata.js`, from symbol lists
//!
//! # Example
//!
//! ```
//! use sift_index::{KeyScheme, SearchIndex, SearchParams, parse_table};
//!
//! let table = parse_table(
//!     "var searchData=\n[\n  ['get',['get',['../classgtirb_1_1_e_a.html#a8c',1,'gtirb::EA']]]\n];\n",
//! )
//! .unwrap();
//!
//! let mut index = SearchIndex::new(KeyScheme::Escaped);
//! index.add_table("all", table);
//!
//! let hits = index.search("Ge", &SearchParams::default());
//! assert_eq!(hits[0].locations[0].qualified_name, "gtirb::EA::get");
//! ```

#![warn(missing_docs)]

mod build;
mod discovery;
mod emit;
mod error;
mod key;
mod lexer;
mod manifest;
mod model;
mod parse;
mod search;
mod validate;

pub use build::{BuiltFile, BuiltIndex, Symbol, SymbolKind, build_index, load_symbols};
pub use discovery::{
    IndexFile, MANIFEST_FILENAME, discover_index_files, index_filename, load_table,
    parse_index_filename,
};
pub use emit::emit_table;
pub use error::{IndexError, ParseError};
pub use key::{KeyScheme, derive_key, key_initial, query_key};
pub use lexer::{Token, TokenKind, tokenize};
pub use manifest::{
    ManifestSection, SectionManifest, default_label, emit_manifest, load_manifest, parse_manifest,
};
pub use model::{DEFAULT_VARIABLE, Href, Layout, Location, SearchEntry, SearchTable};
pub use parse::parse_table;
pub use search::{
    ALL_SECTION, HitLocation, MAX_FUZZY_DISTANCE, MatchKind, SearchHit, SearchIndex, SearchParams,
};
pub use validate::{TableWarning, validate_table};
