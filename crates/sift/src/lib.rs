//! sift: documentation search-index toolkit
//!
//! Documentation generators write a static search index next to their HTML output: a set of
//! small JavaScript files mapping lowercase keys to symbol names and links, read by a
//! client-side search widget. sift treats those files as a data format. It looks symbols up
//! from the terminal, validates and canonically re-emits index files, and builds new search
//! directories from symbol lists.

#![warn(missing_docs)]

pub mod cli;
