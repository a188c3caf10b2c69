//! Error types for parsing, writing, and structural access.

use crate::tag::Tag;
use thiserror::Error;

/// Errors that can occur while parsing, writing, or accessing a [`Value`](crate::Value).
#[derive(Error, Debug)]
pub enum Error {
    /// The input was not a well-formed document.
    /// `line` and `column` are 1-based; `column` counts bytes.
    #[error("parse error at line {line}, column {column}: {kind}")]
    Parse {
        line: usize,
        column: usize,
        kind: ParseErrorKind,
    },

    /// An operation assumed a tag the value does not currently hold.
    #[error("expected {expected} value, found {found}")]
    WrongType { expected: Tag, found: Tag },

    /// Array index past the end.
    #[error("index {index} out of range for array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What went wrong during a parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A keyword or delimiter did not match.
    #[error("expected {expected}, found {found}")]
    MalformedLiteral { expected: String, found: String },

    /// The numeric scan did not produce a valid float.
    #[error("malformed number {text:?}")]
    MalformedNumber { text: String },

    /// The input ended in the middle of a value.
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    /// A complete value was read but more input followed.
    #[error("trailing characters starting with {found}")]
    TrailingCharacters { found: String },

    /// Arrays/objects nested deeper than the configured limit.
    #[error("nesting depth exceeds limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Unknown or truncated escape sequence (escaped string mode only).
    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String },

    /// Byte input that is not UTF-8; `offset` is the first bad byte.
    #[error("invalid UTF-8 at byte {offset}")]
    InvalidUtf8 { offset: usize },
}

impl Error {
    /// The parse failure kind, if this is a parse error.
    pub fn parse_kind(&self) -> Option<&ParseErrorKind> {
        match self {
            Error::Parse { kind, .. } => Some(kind),
            _ => None,
        }
    }
}

/// Convenience alias used throughout bjson-core.
pub type Result<T> = std::result::Result<T, Error>;
