//! Recursive-descent parser: text → [`Value`] tree.
//!
//! The parser makes a single pass over the input with one byte of lookahead,
//! skipping whitespace between tokens. It accepts:
//!
//! - Arrays `[a, b]` and objects `{"k": v}` (objects may nest anywhere)
//! - Strings in double or single quotes
//! - The keywords `true`, `false`, `null`
//! - Decimal floating-point numbers with optional sign, fraction and exponent,
//!   plus the non-finite spellings `inf`, `-inf` and `NaN` the writer emits
//!
//! # Key design decisions
//!
//! - **Sentinel-terminated arrays**: `read_value` yields [`Value::Undefined`]
//!   when the next token is `]` or `}` without consuming it; `read_array`
//!   loops until it sees that sentinel.
//! - **Legacy strings**: in [`StringMode::Legacy`] a backslash is an ordinary
//!   character and the string ends at the first matching quote.
//! - **First key wins**: a repeated object key keeps its first value.
//! - **All or nothing**: the first error aborts the parse; no partial tree is
//!   returned.

use crate::error::{Error, ParseErrorKind, Result};
use crate::options::{Options, StringMode};
use crate::value::{Array, Object, Pair, Value};
use std::io::Read;

/// Parse a complete document. Trailing non-whitespace is an error.
///
/// ```
/// use bjson_core::parse;
///
/// let v = parse("[1, 2, 3]").unwrap();
/// assert_eq!(v.get(2).unwrap(), &3.0);
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with(input, Options::default())
}

pub fn parse_with(input: &str, options: Options) -> Result<Value> {
    let mut parser = Parser::with_options(input, options);
    let value = parser.read_document()?;
    parser.finish()?;
    Ok(value)
}

/// Parse a document that must be an object.
pub fn parse_object(input: &str) -> Result<Object> {
    parse_object_with(input, Options::default())
}

pub fn parse_object_with(input: &str, options: Options) -> Result<Object> {
    let mut parser = Parser::with_options(input, options);
    let object = parser.read_object()?;
    parser.finish()?;
    Ok(object)
}

/// Read the whole byte source, then parse it as one document.
pub fn from_reader<R: Read>(reader: R) -> Result<Value> {
    from_reader_with(reader, Options::default())
}

/// Invalid UTF-8 is reported as a parse error at the first bad byte.
pub fn from_reader_with<R: Read>(mut reader: R, options: Options) -> Result<Value> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    match std::str::from_utf8(&bytes) {
        Ok(input) => parse_with(input, options),
        Err(err) => {
            let offset = err.valid_up_to();
            let (line, column) = line_column(&bytes, offset);
            Err(Error::Parse {
                line,
                column,
                kind: ParseErrorKind::InvalidUtf8 { offset },
            })
        }
    }
}

/// 1-based line and byte column of `offset` within `bytes`.
fn line_column(bytes: &[u8], offset: usize) -> (usize, usize) {
    let consumed = &bytes[..offset.min(bytes.len())];
    let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = consumed
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    (line, consumed.len() - line_start + 1)
}

/// Streaming parser over a text buffer.
///
/// [`next_value`](Self::next_value) can be called repeatedly to read a
/// sequence of whitespace-separated documents.
pub struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    options: Options,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, Options::default())
    }

    pub fn with_options(input: &'a str, options: Options) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            depth: 0,
            options,
        }
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Read the next document, or `None` once only whitespace remains.
    pub fn next_value(&mut self) -> Result<Option<Value>> {
        if self.peek().is_none() {
            return Ok(None);
        }
        self.read_document().map(Some)
    }

    /// Read an object, which must start with `{`.
    pub fn read_object(&mut self) -> Result<Object> {
        self.expect(b'{', "'{'")?;
        self.nested(Self::read_members)
    }

    /// Succeeds if nothing but whitespace is left.
    pub fn finish(&mut self) -> Result<()> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(self.error(ParseErrorKind::TrailingCharacters {
                found: self.found(),
            })),
        }
    }

    fn read_document(&mut self) -> Result<Value> {
        let value = self.read_value()?;
        if value.is_defined() {
            Ok(value)
        } else {
            Err(self.mismatch("value"))
        }
    }

    /// Read one value. Returns [`Value::Undefined`], without consuming
    /// anything, when the next token closes an array or object.
    fn read_value(&mut self) -> Result<Value> {
        let Some(byte) = self.peek() else {
            return Err(self.mismatch("value"));
        };
        match byte {
            b']' | b'}' => Ok(Value::Undefined),
            b',' | b':' => Err(self.mismatch("value")),
            b'[' => {
                self.pos += 1;
                self.nested(Self::read_array)
            }
            b'{' => {
                self.pos += 1;
                self.nested(Self::read_members).map(Value::from)
            }
            b'"' | b'\'' => {
                self.pos += 1;
                self.read_string(byte).map(Value::String)
            }
            b't' => self.read_keyword("true", Value::True),
            b'f' => self.read_keyword("false", Value::False),
            b'n' => self.read_keyword("null", Value::Null),
            _ => self.read_number(),
        }
    }

    fn nested<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.error(ParseErrorKind::DepthLimitExceeded {
                limit: self.options.max_depth,
            }));
        }
        self.depth += 1;
        let result = read(self);
        self.depth -= 1;
        result
    }

    /// Elements up to and including `]`. The `[` is already consumed.
    fn read_array(&mut self) -> Result<Value> {
        let mut array = Value::Array(Array::new());
        let mut after_comma = false;
        loop {
            let item = self.read_value()?;
            if !item.is_defined() {
                if after_comma {
                    return Err(self.mismatch("value"));
                }
                break;
            }
            array.append(item);
            after_comma = self.eat(b',');
            if !after_comma {
                break;
            }
        }
        self.expect(b']', "',' or ']'")?;
        Ok(array)
    }

    /// Pairs up to and including `}`. The `{` is already consumed.
    fn read_members(&mut self) -> Result<Object> {
        let mut object = Object::new();
        let mut after_comma = false;
        while let Some((key, value)) = self.read_pair(after_comma)? {
            object.entry(key).or_insert(value);
            after_comma = self.eat(b',');
            if !after_comma {
                break;
            }
        }
        self.expect(b'}', "',' or '}'")?;
        Ok(object)
    }

    /// `None` at a closing brace, unless a pair is required after a comma.
    fn read_pair(&mut self, required: bool) -> Result<Option<Pair>> {
        match self.peek() {
            Some(b'}') if !required => Ok(None),
            Some(quote @ (b'"' | b'\'')) => {
                self.pos += 1;
                let key = self.read_string(quote)?;
                self.expect(b':', "':'")?;
                let value = self.read_value()?;
                if !value.is_defined() {
                    return Err(self.mismatch("value"));
                }
                Ok(Some((key, value)))
            }
            _ => Err(self.mismatch("string key")),
        }
    }

    /// String contents up to the matching `quote`. The opening quote is
    /// already consumed.
    fn read_string(&mut self, quote: u8) -> Result<String> {
        match self.options.strings {
            StringMode::Legacy => self.read_legacy_string(quote),
            StringMode::Escaped => self.read_escaped_string(quote),
        }
    }

    fn read_legacy_string(&mut self, quote: u8) -> Result<String> {
        let start = self.pos;
        let Some(len) = self.bytes[start..].iter().position(|&b| b == quote) else {
            self.pos = self.bytes.len();
            return Err(self.mismatch("closing quote"));
        };
        self.pos = start + len + 1;
        Ok(self.input[start..start + len].to_owned())
    }

    fn read_escaped_string(&mut self, quote: u8) -> Result<String> {
        let mut out = String::new();
        let mut run_start = self.pos;
        loop {
            let Some(byte) = self.bytes.get(self.pos).copied() else {
                return Err(self.mismatch("closing quote"));
            };
            self.pos += 1;
            if byte == quote {
                out.push_str(&self.input[run_start..self.pos - 1]);
                return Ok(out);
            }
            if byte == b'\\' {
                out.push_str(&self.input[run_start..self.pos - 1]);
                out.push(self.read_escape()?);
                run_start = self.pos;
            }
        }
    }

    /// The character for an escape sequence whose backslash is consumed.
    fn read_escape(&mut self) -> Result<char> {
        let start = self.pos - 1;
        let Some(byte) = self.bytes.get(self.pos).copied() else {
            return Err(self.mismatch("escape sequence"));
        };
        self.pos += 1;
        let decoded = match byte {
            b'"' => '"',
            b'\'' => '\'',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.read_unicode_escape(start),
            _ => return Err(self.invalid_escape(start)),
        };
        Ok(decoded)
    }

    fn read_unicode_escape(&mut self, start: usize) -> Result<char> {
        let high = self.read_hex4(start)?;
        let code = if (0xD800..0xDC00).contains(&high) {
            if !(self.eat_raw(b'\\') && self.eat_raw(b'u')) {
                return Err(self.invalid_escape(start));
            }
            let low = self.read_hex4(start)?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(self.invalid_escape(start));
            }
            0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
        } else {
            high
        };
        char::from_u32(code).ok_or_else(|| self.invalid_escape(start))
    }

    fn read_hex4(&mut self, start: usize) -> Result<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let Some(byte) = self.bytes.get(self.pos).copied() else {
                return Err(self.mismatch("hex digit"));
            };
            let digit = char::from(byte)
                .to_digit(16)
                .ok_or_else(|| self.invalid_escape(start))?;
            self.pos += 1;
            code = code * 16 + digit;
        }
        Ok(code)
    }

    /// Match `keyword` byte by byte; any mismatch is a malformed literal.
    fn read_keyword(&mut self, keyword: &str, value: Value) -> Result<Value> {
        for &expected in keyword.as_bytes() {
            if self.bytes.get(self.pos) != Some(&expected) {
                return Err(self.error(ParseErrorKind::MalformedLiteral {
                    expected: format!("`{keyword}`"),
                    found: self.found(),
                }));
            }
            self.pos += 1;
        }
        Ok(value)
    }

    /// `['+'|'-'] digits ['.' digits] [('e'|'E') ['+'|'-'] digits]`, with at
    /// least one digit before the exponent, or `['+'|'-'] ('inf'|'NaN')`.
    fn read_number(&mut self) -> Result<Value> {
        let start = self.pos;
        self.eat_sign();
        if self.eat_word("inf") || self.eat_word("NaN") {
            return self.number_from(start);
        }
        let mut digits = self.skip_digits();
        if self.eat_raw(b'.') {
            digits += self.skip_digits();
        }
        if digits == 0 {
            return Err(self.error_at(
                start,
                ParseErrorKind::MalformedNumber {
                    text: self.token_from(start).to_owned(),
                },
            ));
        }
        if self.eat_raw(b'e') || self.eat_raw(b'E') {
            self.eat_sign();
            if self.skip_digits() == 0 {
                return Err(self.error_at(
                    start,
                    ParseErrorKind::MalformedNumber {
                        text: self.token_from(start).to_owned(),
                    },
                ));
            }
        }
        self.number_from(start)
    }

    fn number_from(&self, start: usize) -> Result<Value> {
        let text = &self.input[start..self.pos];
        text.parse::<f64>().map(Value::Number).map_err(|_| {
            self.error_at(
                start,
                ParseErrorKind::MalformedNumber {
                    text: text.to_owned(),
                },
            )
        })
    }

    /// Consume `word` if it is the very next token and is not followed by
    /// more letters or digits.
    fn eat_word(&mut self, word: &str) -> bool {
        let end = self.pos + word.len();
        let matches = self.bytes[self.pos..].starts_with(word.as_bytes())
            && !self
                .bytes
                .get(end)
                .is_some_and(|b| b.is_ascii_alphanumeric());
        if matches {
            self.pos = end;
        }
        matches
    }

    fn eat_sign(&mut self) {
        if !self.eat_raw(b'+') {
            self.eat_raw(b'-');
        }
    }

    fn skip_digits(&mut self) -> usize {
        let count = self.bytes[self.pos..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        self.pos += count;
        count
    }

    /// The run of input from `start` up to the next whitespace or delimiter,
    /// for error messages.
    fn token_from(&self, start: usize) -> &'a str {
        let input = self.input;
        let len = input.as_bytes()[start..]
            .iter()
            .position(|b| b.is_ascii_whitespace() || b",:[]{}".contains(b))
            .unwrap_or(input.len() - start);
        &input[start..start + len]
    }

    /// Next non-whitespace byte, not consumed.
    fn peek(&mut self) -> Option<u8> {
        while let Some(byte) = self.bytes.get(self.pos) {
            if !byte.is_ascii_whitespace() {
                return Some(*byte);
            }
            self.pos += 1;
        }
        None
    }

    /// Consume `byte` if it is the next token.
    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `byte` if it is the very next byte, without skipping whitespace.
    fn eat_raw(&mut self, byte: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8, expected: &str) -> Result<()> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.mismatch(expected))
        }
    }

    /// Describe the byte at the current position.
    fn found(&self) -> String {
        match self.input.get(self.pos..).and_then(|rest| rest.chars().next()) {
            Some(c) => format!("{c:?}"),
            None if self.pos >= self.bytes.len() => "end of input".to_string(),
            None => format!("byte 0x{:02x}", self.bytes[self.pos]),
        }
    }

    fn mismatch(&self, expected: &str) -> Error {
        let kind = if self.pos >= self.bytes.len() {
            ParseErrorKind::UnexpectedEnd {
                expected: expected.to_string(),
            }
        } else {
            ParseErrorKind::MalformedLiteral {
                expected: expected.to_string(),
                found: self.found(),
            }
        };
        self.error(kind)
    }

    fn invalid_escape(&self, start: usize) -> Error {
        let end = self.pos.min(self.bytes.len());
        self.error_at(
            start,
            ParseErrorKind::InvalidEscape {
                sequence: String::from_utf8_lossy(&self.bytes[start..end]).into_owned(),
            },
        )
    }

    fn error(&self, kind: ParseErrorKind) -> Error {
        self.error_at(self.pos, kind)
    }

    /// Attach a 1-based line and byte column to `kind`.
    fn error_at(&self, offset: usize, kind: ParseErrorKind) -> Error {
        let (line, column) = line_column(self.bytes, offset);
        Error::Parse { line, column, kind }
    }
}
