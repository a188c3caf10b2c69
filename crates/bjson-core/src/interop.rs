//! Bridges to the serde ecosystem.
//!
//! [`Value`] implements `Serialize`, so any serde format can emit it
//! (`serde_json::to_string(&value)` gives strictly escaped JSON). Values can
//! also be built from a `serde_json::Value`.
//!
//! Mapping of the extension variants: `Byte` serializes as serde bytes,
//! `Int32`/`Int64` as integers, `Date` as its second count, and `Undefined`
//! as `None`.

use crate::value::Value;
use serde::ser::{Serialize, Serializer};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Object(object) => serializer.collect_map(object.iter()),
            Value::Array(items) => serializer.collect_seq(items.iter()),
            Value::True => serializer.serialize_bool(true),
            Value::False => serializer.serialize_bool(false),
            Value::Null => serializer.serialize_unit(),
            Value::Byte(bytes) => serializer.serialize_bytes(bytes),
            Value::Int32(n) => serializer.serialize_i32(*n),
            Value::Int64(n) => serializer.serialize_i64(*n),
            Value::Date(secs) => serializer.serialize_i64(*secs),
            Value::Undefined => serializer.serialize_none(),
        }
    }
}

/// Numbers become `Number` (f64); objects keep serde_json's key set.
impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::from(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => items.into_iter().map(Value::from).collect(),
            serde_json::Value::Object(map) => {
                Value::from_pairs(map.into_iter().map(|(key, value)| (key, Value::from(value))))
            }
        }
    }
}
