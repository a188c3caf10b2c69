//! Borrowed, shape-only view of a [`Value`].
//!
//! An `Element` carries a tag and a view of the payload but owns nothing.
//! Converting one back into a [`Value`] deep-copies string, array and byte
//! payloads and shares the object handle.

use crate::tag::Tag;
use crate::value::{Array, Object, Value};
use std::rc::Rc;

#[derive(Debug, Clone, Copy)]
pub enum Element<'a> {
    String(&'a str),
    Number(f64),
    Object(&'a Rc<Object>),
    Array(&'a [Value]),
    True,
    False,
    Null,
    Byte(&'a [u8]),
    Int32(i32),
    Int64(i64),
    /// Seconds since the Unix epoch.
    Date(i64),
    Undefined,
}

impl Element<'_> {
    pub fn tag(&self) -> Tag {
        match self {
            Element::String(_) => Tag::String,
            Element::Number(_) => Tag::Number,
            Element::Object(_) => Tag::Object,
            Element::Array(_) => Tag::Array,
            Element::True => Tag::True,
            Element::False => Tag::False,
            Element::Null => Tag::Null,
            Element::Byte(_) => Tag::Byte,
            Element::Int32(_) => Tag::Int32,
            Element::Int64(_) => Tag::Int64,
            Element::Date(_) => Tag::Date,
            Element::Undefined => Tag::Undefined,
        }
    }
}

impl<'a> From<&'a Value> for Element<'a> {
    fn from(value: &'a Value) -> Self {
        value.element()
    }
}

impl From<Element<'_>> for Value {
    fn from(element: Element<'_>) -> Self {
        match element {
            Element::String(s) => Value::String(s.to_owned()),
            Element::Number(n) => Value::Number(n),
            Element::Object(object) => Value::Object(Rc::clone(object)),
            Element::Array(items) => Value::Array(Array::from(items.to_vec())),
            Element::True => Value::True,
            Element::False => Value::False,
            Element::Null => Value::Null,
            Element::Byte(bytes) => Value::Byte(bytes.to_vec()),
            Element::Int32(n) => Value::Int32(n),
            Element::Int64(n) => Value::Int64(n),
            Element::Date(secs) => Value::Date(secs),
            Element::Undefined => Value::Undefined,
        }
    }
}
