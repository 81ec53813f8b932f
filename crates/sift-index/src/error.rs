//! Error types for the sift-index crate.

use std::{error::Error, fmt, io, path::PathBuf};

use thiserror::Error;

/// Syntax error in an index file, with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message.
    pub message: String,
    /// Byte offset in the input where the error occurred.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column (in characters).
    pub column: usize,
    /// The full text of the offending line.
    pub source_line: String,
}

impl ParseError {
    /// Creates an error at `offset`, computing line and column from `input`.
    pub fn new(message: impl Into<String>, offset: usize, input: &str) -> Self {
        let offset = offset.min(input.len());
        let before = &input[..floor_char_boundary(input, offset)];
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let line = before.matches('\n').count() + 1;
        let column = before[line_start..].chars().count() + 1;
        let source_line = input[line_start..]
            .lines()
            .next()
            .unwrap_or_default()
            .to_string();

        Self {
            message: message.into(),
            offset,
            line,
            column,
            source_line,
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        let message = self.message.as_str();
        if message.contains("unterminated string") {
            Some("Close the string with the same quote character it was opened with")
        } else if message.contains("expected ']'") {
            Some("Check that every '[' has a matching ']' and entries are separated by ','")
        } else if message.contains("exactly two elements") {
            Some("Entries have the shape [key, [display, locations...]]")
        } else {
            None
        }
    }
}

/// Returns the largest char boundary not greater than `index`.
fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "syntax error at line {}, column {}: {}",
            self.line, self.column, self.message
        )?;

        // Long generated lines are clipped around the error position
        let chars: Vec<char> = self.source_line.chars().collect();
        let caret = self.column.saturating_sub(1).min(chars.len());
        let start = caret.saturating_sub(40);
        let end = (caret + 40).min(chars.len());
        let snippet: String = chars[start..end].iter().collect();
        writeln!(f, "  {snippet}")?;
        write!(f, "  {}^", " ".repeat(caret - start))?;

        if let Some(suggestion) = self.suggestion() {
            write!(f, "\nhint: {suggestion}")?;
        }

        Ok(())
    }
}

impl Error for ParseError {}

/// Errors that can occur when loading, building or writing search indexes.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to read an index file.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write an index file.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to remove an index file left by a previous build.
    #[error("failed to remove {path}: {source}")]
    RemoveFile {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An index file is not valid.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path to the file.
        path: PathBuf,
        /// Positioned syntax error.
        source: ParseError,
    },

    /// The section manifest (`searchdata.js`) is malformed.
    #[error("invalid section manifest {path}: {message}")]
    Manifest {
        /// Path to the manifest.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// A symbol list could not be decoded.
    #[error("invalid symbol list {path}: {source}")]
    Symbols {
        /// Path to the symbol list.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The search directory does not exist or is not a directory.
    #[error("search directory not found: {0}")]
    MissingDirectory(PathBuf),

    /// Failed to walk the search directory.
    #[error("failed to scan search directory: {0}")]
    Walk(String),
}

impl IndexError {
    /// Creates a `Walk` error from a walkdir error.
    pub(crate) fn walk(source: &walkdir::Error) -> Self {
        Self::Walk(source.to_string())
    }
}
