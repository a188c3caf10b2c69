//! Writer: [`Value`] tree → text.
//!
//! Output is compact (no whitespace). Each tag renders as:
//!
//! - **String**: `"` + contents + `"`; contents are verbatim in
//!   [`StringMode::Legacy`] and JSON-escaped in [`StringMode::Escaped`]
//! - **Number**: shortest text that parses back to the same `f64`; `inf`,
//!   `-inf` and `NaN` for non-finite values (not valid JSON)
//! - **Object**: `{"key":value,...}` in key order
//! - **Array**: `[a,b,...]`
//! - **True / False / Null**: the keyword
//! - **Byte**: the raw bytes, unescaped (not valid JSON)
//! - **Int32 / Int64 / Date**: decimal integer
//! - **Undefined**: `*undefined*`
//!
//! Byte, Int32, Int64 and Date output does not parse back to the same tag.

use crate::error::Result;
use crate::options::{Options, StringMode};
use crate::value::{Object, Value};
use std::fmt;
use std::io::{self, Write};

const UNDEFINED: &[u8] = b"*undefined*";

/// Write `value` to `out` with default options.
pub fn to_writer<W: Write>(out: W, value: &Value) -> Result<()> {
    to_writer_with(out, value, Options::default())
}

pub fn to_writer_with<W: Write>(out: W, value: &Value, options: Options) -> Result<()> {
    Writer::with_options(out, options).write_value(value)
}

pub fn to_vec(value: &Value) -> Result<Vec<u8>> {
    to_vec_with(value, Options::default())
}

pub fn to_vec_with(value: &Value, options: Options) -> Result<Vec<u8>> {
    let mut writer = Writer::with_options(Vec::new(), options);
    writer.write_value(value)?;
    Ok(writer.into_inner())
}

/// Render `value` as a `String`. Byte blobs that are not valid UTF-8 are
/// converted lossily; use [`to_vec`] to get the exact bytes.
///
/// ```
/// use bjson_core::{to_string, Value};
///
/// let v = Value::from(vec![Value::from("a"), Value::from(1.5), Value::Null]);
/// assert_eq!(to_string(&v).unwrap(), r#"["a",1.5,null]"#);
/// ```
pub fn to_string(value: &Value) -> Result<String> {
    to_string_with(value, Options::default())
}

pub fn to_string_with(value: &Value, options: Options) -> Result<String> {
    to_vec_with(value, options).map(into_string_lossy)
}

/// Render a bare object mapping.
pub fn object_to_string(object: &Object) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer.write_object(object)?;
    Ok(into_string_lossy(writer.into_inner()))
}

fn into_string_lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned())
}

/// Serializer over any byte sink.
pub struct Writer<W> {
    out: W,
    options: Options,
}

impl<W: Write> Writer<W> {
    pub fn new(out: W) -> Self {
        Self::with_options(out, Options::default())
    }

    pub fn with_options(out: W, options: Options) -> Self {
        Self { out, options }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::String(s) => self.write_string(s)?,
            Value::Number(n) => write!(self.out, "{n}")?,
            Value::Object(object) => self.write_object(object)?,
            Value::Array(items) => {
                self.out.write_all(b"[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        self.out.write_all(b",")?;
                    }
                    self.write_value(item)?;
                }
                self.out.write_all(b"]")?;
            }
            Value::True => self.out.write_all(b"true")?,
            Value::False => self.out.write_all(b"false")?,
            Value::Null => self.out.write_all(b"null")?,
            Value::Byte(bytes) => self.out.write_all(bytes)?,
            Value::Int32(n) => write!(self.out, "{n}")?,
            Value::Int64(n) => write!(self.out, "{n}")?,
            Value::Date(secs) => write!(self.out, "{secs}")?,
            Value::Undefined => self.out.write_all(UNDEFINED)?,
        }
        Ok(())
    }

    pub fn write_object(&mut self, object: &Object) -> Result<()> {
        self.out.write_all(b"{")?;
        for (i, (key, value)) in object.iter().enumerate() {
            if i > 0 {
                self.out.write_all(b",")?;
            }
            self.write_string(key)?;
            self.out.write_all(b":")?;
            self.write_value(value)?;
        }
        self.out.write_all(b"}")?;
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(b"\"")?;
        match self.options.strings {
            StringMode::Legacy => self.out.write_all(s.as_bytes())?,
            StringMode::Escaped => write_escaped(&mut self.out, s)?,
        }
        self.out.write_all(b"\"")
    }
}

fn write_escaped<W: Write>(out: &mut W, s: &str) -> io::Result<()> {
    let mut run_start = 0;
    for (i, c) in s.char_indices() {
        let escape = match c {
            '"' => Some("\\\""),
            '\\' => Some("\\\\"),
            '\n' => Some("\\n"),
            '\r' => Some("\\r"),
            '\t' => Some("\\t"),
            '\u{8}' => Some("\\b"),
            '\u{c}' => Some("\\f"),
            c if c < ' ' => None,
            _ => continue,
        };
        out.write_all(&s.as_bytes()[run_start..i])?;
        match escape {
            Some(seq) => out.write_all(seq.as_bytes())?,
            None => write!(out, "\\u{:04x}", u32::from(c))?,
        }
        run_start = i + c.len_utf8();
    }
    out.write_all(&s.as_bytes()[run_start..])
}

/// Default-options rendering; byte blobs are converted lossily.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
