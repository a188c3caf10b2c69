//! Parser and writer configuration.

use serde::{Deserialize, Serialize};

/// How string contents are read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringMode {
    /// No escape processing. The parser copies everything up to the matching
    /// closing quote, backslashes included; the writer emits contents
    /// verbatim. A string containing its own quote character therefore does
    /// not survive a round trip.
    #[default]
    Legacy,
    /// JSON escapes (`\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t`, `\uXXXX`),
    /// plus `\'` on input. The writer escapes quotes, backslashes and
    /// control characters.
    Escaped,
}

/// Options shared by [`Parser`](crate::Parser) and [`Writer`](crate::Writer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub strings: StringMode,
    /// Maximum array/object nesting accepted by the parser.
    pub max_depth: usize,
}

impl Options {
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    pub const fn new() -> Self {
        Self {
            strings: StringMode::Legacy,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    /// Default options with escape processing turned on.
    pub const fn escaped() -> Self {
        Self::new().with_strings(StringMode::Escaped)
    }

    pub const fn with_strings(mut self, strings: StringMode) -> Self {
        self.strings = strings;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}
