//! # bjson-core
//!
//! In-memory tree for JSON documents extended with a few BSON-style
//! primitives (byte blobs, 32/64-bit integers, timestamps), with a parser
//! that builds the tree from text and a writer that renders it back.
//!
//! ## Quick start
//!
//! ```rust
//! use bjson_core::{parse, to_string, Tag, Value};
//!
//! let mut v = parse(r#"{"name":"Alice","scores":[95,87]}"#).unwrap();
//! assert_eq!(v.tag(), Tag::Object);
//!
//! let scores = v.as_object_mut().unwrap().get_mut("scores").unwrap();
//! scores.append(92.0);
//! assert_eq!(to_string(&v).unwrap(), r#"{"name":"Alice","scores":[95,87,92]}"#);
//!
//! // Null is never equal to itself.
//! assert_ne!(Value::Null, Value::Null);
//! ```
//!
//! ## Modules
//!
//! - [`value`]: `Value`, `Array`, `Object`, `Pair`
//! - [`element`]: borrowed `Element` view
//! - [`tag`]: `Tag` discriminant and its ordering
//! - [`compare`]: equality and ordering rules
//! - [`decoder`]: text → `Value`
//! - [`encoder`]: `Value` → text
//! - [`options`]: string mode and nesting limit
//! - [`error`]: error types
//! - [`interop`]: serde / serde_json bridges

pub mod compare;
pub mod decoder;
pub mod element;
pub mod encoder;
pub mod error;
pub mod interop;
pub mod options;
pub mod tag;
pub mod value;

pub use decoder::{
    from_reader, from_reader_with, parse, parse_object, parse_object_with, parse_with, Parser,
};
pub use element::Element;
pub use encoder::{
    object_to_string, to_string, to_string_with, to_vec, to_vec_with, to_writer, to_writer_with,
    Writer,
};
pub use error::{Error, ParseErrorKind, Result};
pub use options::{Options, StringMode};
pub use tag::Tag;
pub use value::{Array, Object, Pair, Value};
