//! The owning value tree.
//!
//! [`Value`] is a tagged enum whose variants own their payloads: strings,
//! arrays and byte blobs are deep-copied on `clone`, scalars are copied
//! bitwise, and objects are shared through an `Rc` handle that is copied on
//! write (see [`Value::as_object_mut`]).
//!
//! Arrays grow through [`Value::append`] and [`Value::append_all`], which
//! coerce any non-array receiver into an array first:
//!
//! ```
//! use bjson_core::Value;
//!
//! let mut v = Value::from(5.0);
//! v.append(6.0);
//! assert_eq!(v, Value::from(vec![Value::from(5.0), Value::from(6.0)]));
//! ```

use crate::element::Element;
use crate::error::{Error, Result};
use crate::tag::Tag;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};
use std::rc::Rc;

/// Ordered mapping from key to value. Iteration follows key byte order.
pub type Object = BTreeMap<String, Value>;

/// A key/value unit used when building an [`Object`].
pub type Pair = (String, Value);

/// A JSON value extended with BSON-style byte blobs, fixed-width integers
/// and timestamps.
///
/// Equality and ordering are defined in [`compare`](crate::compare); note
/// that `Null` and `Undefined` are never equal to anything, themselves
/// included.
///
/// Dropping a value tears down nested arrays, and objects no other value
/// shares, with an explicit work stack, so arbitrarily deep trees do not
/// overflow the call stack.
#[derive(Debug, Clone, Default)]
pub enum Value {
    String(String),
    Number(f64),
    Object(Rc<Object>),
    Array(Array),
    True,
    False,
    Null,
    Byte(Vec<u8>),
    Int32(i32),
    Int64(i64),
    /// Seconds since the Unix epoch.
    Date(i64),
    /// No value yet. Also the parser's end-of-sequence marker.
    #[default]
    Undefined,
}

impl Value {
    /// An array of `len` undefined elements.
    pub fn array(len: usize) -> Self {
        Value::Array(std::iter::repeat_with(Value::default).take(len).collect())
    }

    /// A timestamp, in seconds since the Unix epoch.
    pub fn date(secs: i64) -> Self {
        Value::Date(secs)
    }

    /// Build an object from pairs. When a key repeats, the first pair wins.
    pub fn from_pairs<I: IntoIterator<Item = Pair>>(pairs: I) -> Self {
        let mut object = Object::new();
        for (key, value) in pairs {
            object.entry(key).or_insert(value);
        }
        Value::Object(Rc::new(object))
    }

    pub fn tag(&self) -> Tag {
        self.element().tag()
    }

    /// Borrowed view of the payload.
    pub fn element(&self) -> Element<'_> {
        match self {
            Value::String(s) => Element::String(s),
            Value::Number(n) => Element::Number(*n),
            Value::Object(object) => Element::Object(object),
            Value::Array(items) => Element::Array(items),
            Value::True => Element::True,
            Value::False => Element::False,
            Value::Null => Element::Null,
            Value::Byte(bytes) => Element::Byte(bytes),
            Value::Int32(n) => Element::Int32(*n),
            Value::Int64(n) => Element::Int64(*n),
            Value::Date(secs) => Element::Date(*secs),
            Value::Undefined => Element::Undefined,
        }
    }

    /// False only for [`Value::Undefined`]. This is not JSON truthiness:
    /// `false`, `null` and `0` are all defined.
    pub fn is_defined(&self) -> bool {
        !matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Replace the current payload with `value`. The old payload is dropped first.
    pub fn set(&mut self, value: impl Into<Value>) -> &mut Self {
        *self = Value::Undefined;
        *self = value.into();
        self
    }

    /// The `index`-th element of an array.
    pub fn get(&self, index: usize) -> Result<&Value> {
        let items = self.expect_array()?;
        items
            .as_slice()
            .get(index)
            .ok_or(Error::IndexOutOfRange {
                index,
                len: items.len(),
            })
    }

    /// Mutable access to the `index`-th element of an array.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Value> {
        let items = self.expect_array_mut()?;
        let len = items.len();
        items
            .as_mut_slice()
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Append one element.
    ///
    /// - `Undefined` becomes `[item]`.
    /// - An array grows by one; existing elements keep their indices.
    /// - Anything else becomes `[previous, item]`.
    ///
    /// `item` is always appended as a single element, even when it is
    /// itself an array.
    pub fn append(&mut self, item: impl Into<Value>) -> &mut Self {
        self.coerce_into_array(1).push(item.into());
        self
    }

    /// Append every element of `items`, with the same coercion rules as
    /// [`append`](Self::append): `Undefined` becomes exactly `items`, any
    /// other non-array becomes `[previous, items...]`.
    pub fn append_all<I: IntoIterator<Item = Value>>(&mut self, items: I) -> &mut Self {
        let items = items.into_iter();
        let additional = items.size_hint().0;
        self.coerce_into_array(additional).extend(items);
        self
    }

    fn coerce_into_array(&mut self, additional: usize) -> &mut Array {
        if !matches!(self, Value::Array(_)) {
            let previous = std::mem::take(self);
            let mut items = Array::with_capacity(additional + 1);
            if previous.is_defined() {
                items.push(previous);
            }
            *self = Value::Array(items);
        }
        match self {
            Value::Array(items) => items,
            _ => unreachable!("receiver was coerced into an array"),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Mutable access to an object. If the mapping is shared with other
    /// values it is cloned first, so the other holders do not observe the
    /// change.
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(object) => Some(Rc::make_mut(object)),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Byte(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Seconds since the Unix epoch, for a `Date` value.
    pub fn as_date(&self) -> Option<i64> {
        match self {
            Value::Date(secs) => Some(*secs),
            _ => None,
        }
    }

    /// A `Date` value as a UTC timestamp. `None` for other tags and for
    /// second counts outside chrono's representable range.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.as_date()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }

    fn expect_array(&self) -> Result<&Array> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(Error::WrongType {
                expected: Tag::Array,
                found: other.tag(),
            }),
        }
    }

    fn expect_array_mut(&mut self) -> Result<&mut Array> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(Error::WrongType {
                expected: Tag::Array,
                found: other.tag(),
            }),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Byte(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Value::Byte(bytes.to_vec())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(timestamp: DateTime<Utc>) -> Self {
        Value::Date(timestamp.timestamp())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(Array::from(items))
    }
}

impl From<Array> for Value {
    fn from(items: Array) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(object: Object) -> Self {
        Value::Object(Rc::new(object))
    }
}

impl From<Rc<Object>> for Value {
    fn from(object: Rc<Object>) -> Self {
        Value::Object(object)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Array(iter.into_iter().collect())
    }
}

/// Contiguous, owned sequence of values backing [`Value::Array`].
#[derive(Debug, Clone, Default)]
pub struct Array(Vec<Value>);

impl Array {
    pub fn new() -> Self {
        Array(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Array(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [Value] {
        &mut self.0
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl Deref for Array {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.0
    }
}

impl DerefMut for Array {
    fn deref_mut(&mut self) -> &mut [Value] {
        &mut self.0
    }
}

impl From<Vec<Value>> for Array {
    fn from(items: Vec<Value>) -> Self {
        Array(items)
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array(iter.into_iter().collect())
    }
}

impl Extend<Value> for Array {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        detach_children(self, &mut pending);
        while let Some(mut value) = pending.pop() {
            detach_children(&mut value, &mut pending);
        }
    }
}

/// Move the children of an array, or of an object no other value shares,
/// onto `pending`. What remains in `value` drops without recursing.
fn detach_children(value: &mut Value, pending: &mut Vec<Value>) {
    match value {
        Value::Array(items) => pending.append(&mut items.0),
        Value::Object(object) => {
            if let Some(entries) = Rc::get_mut(object) {
                pending.extend(std::mem::take(entries).into_values());
            }
        }
        _ => {}
    }
}
