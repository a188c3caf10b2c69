//! The discriminant shared by [`Value`](crate::Value) and [`Element`](crate::Element).

use std::fmt;

/// Which payload shape a value holds.
///
/// Declaration order is the cross-type sort order: when two values carry
/// different tags, the one whose tag is declared first sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tag {
    String,
    Number,
    Object,
    Array,
    True,
    False,
    Null,
    Byte,
    Int32,
    Int64,
    Date,
    Undefined,
}

impl Tag {
    /// Lower-case name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Tag::String => "string",
            Tag::Number => "number",
            Tag::Object => "object",
            Tag::Array => "array",
            Tag::True => "true",
            Tag::False => "false",
            Tag::Null => "null",
            Tag::Byte => "byte",
            Tag::Int32 => "int32",
            Tag::Int64 => "int64",
            Tag::Date => "date",
            Tag::Undefined => "undefined",
        }
    }

    /// True for the tags that have a grammar production in the parser.
    pub fn is_json(self) -> bool {
        self <= Tag::Null
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
