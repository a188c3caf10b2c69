//! Equality and ordering across all value kinds.
//!
//! Values are compared by [`Tag`](crate::Tag) first: two values with
//! different tags are never equal and sort by tag declaration order. Within
//! a tag:
//!
//! - strings and byte blobs compare byte-lexicographically;
//! - numbers follow IEEE-754 (`NaN` is unordered);
//! - arrays compare element by element, shorter prefix first;
//! - objects compare entry by entry in key order, key before value;
//! - `Int32`, `Int64` and `Date` compare numerically;
//! - `True == True` and `False == False`;
//! - `Null` and `Undefined` are neither equal nor ordered, not even against
//!   themselves.
//!
//! Because of the last rule `PartialEq` is not reflexive. Sorting and other
//! container algorithms should use [`Value::total_cmp`], which is a total
//! order that agrees with `partial_cmp` wherever the latter is defined.
//!
//! Nested arrays and objects are walked with an explicit stack.

use crate::element::Element;
use crate::value::{Object, Value};
use std::cmp::Ordering;
use std::collections::btree_map;
use std::slice;

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Value::Array(x), Value::Array(y)) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    pending.extend(x.iter().zip(y.iter()));
                }
                (Value::Object(x), Value::Object(y)) => {
                    if x.len() != y.len() {
                        return false;
                    }
                    for ((kx, vx), (ky, vy)) in x.iter().zip(y.iter()) {
                        if kx != ky {
                            return false;
                        }
                        pending.push((vx, vy));
                    }
                }
                _ => {
                    if !leaf_eq(a.element(), b.element()) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        walk(self, other, leaf_partial_cmp)
    }
}

impl Value {
    /// Total order for sorting and ordered containers.
    ///
    /// Same as `partial_cmp` except that `Null` equals `Null`, `Undefined`
    /// equals `Undefined`, and `NaN` is placed by [`f64::total_cmp`].
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        walk(self, other, leaf_total_cmp).unwrap_or(Ordering::Equal)
    }
}

fn leaf_eq(a: Element<'_>, b: Element<'_>) -> bool {
    match (a, b) {
        (Element::String(x), Element::String(y)) => x == y,
        (Element::Number(x), Element::Number(y)) => x == y,
        (Element::True, Element::True) | (Element::False, Element::False) => true,
        (Element::Byte(x), Element::Byte(y)) => x == y,
        (Element::Int32(x), Element::Int32(y)) => x == y,
        (Element::Int64(x), Element::Int64(y)) => x == y,
        (Element::Date(x), Element::Date(y)) => x == y,
        _ => false,
    }
}

type Leaf = fn(Element<'_>, Element<'_>) -> Option<Ordering>;

fn leaf_partial_cmp(a: Element<'_>, b: Element<'_>) -> Option<Ordering> {
    let (ta, tb) = (a.tag(), b.tag());
    if ta != tb {
        return Some(ta.cmp(&tb));
    }
    match (a, b) {
        (Element::String(x), Element::String(y)) => Some(x.cmp(y)),
        (Element::Number(x), Element::Number(y)) => x.partial_cmp(&y),
        (Element::Byte(x), Element::Byte(y)) => Some(x.cmp(y)),
        (Element::Int32(x), Element::Int32(y)) => Some(x.cmp(&y)),
        (Element::Int64(x), Element::Int64(y)) => Some(x.cmp(&y)),
        (Element::Date(x), Element::Date(y)) => Some(x.cmp(&y)),
        (Element::True, Element::True) | (Element::False, Element::False) => {
            Some(Ordering::Equal)
        }
        // Null, Undefined
        _ => None,
    }
}

fn leaf_total_cmp(a: Element<'_>, b: Element<'_>) -> Option<Ordering> {
    match (a, b) {
        (Element::Number(x), Element::Number(y)) => {
            Some(x.partial_cmp(&y).unwrap_or_else(|| x.total_cmp(&y)))
        }
        _ => Some(leaf_partial_cmp(a, b).unwrap_or(Ordering::Equal)),
    }
}

/// One level of an in-progress container comparison.
enum Frame<'a> {
    Items(slice::Iter<'a, Value>, slice::Iter<'a, Value>),
    Entries(
        btree_map::Iter<'a, String, Value>,
        btree_map::Iter<'a, String, Value>,
    ),
}

enum Step<'a> {
    Pair(&'a Value, &'a Value),
    Decided(Ordering),
    Exhausted,
}

enum Head<'a> {
    Leaf(Option<Ordering>),
    Descend(Frame<'a>),
}

impl<'a> Frame<'a> {
    fn step(&mut self) -> Step<'a> {
        match self {
            Frame::Items(left, right) => match (left.next(), right.next()) {
                (Some(a), Some(b)) => Step::Pair(a, b),
                (None, None) => Step::Exhausted,
                (None, Some(_)) => Step::Decided(Ordering::Less),
                (Some(_), None) => Step::Decided(Ordering::Greater),
            },
            Frame::Entries(left, right) => match (left.next(), right.next()) {
                (Some((ka, va)), Some((kb, vb))) => match ka.cmp(kb) {
                    Ordering::Equal => Step::Pair(va, vb),
                    decided => Step::Decided(decided),
                },
                (None, None) => Step::Exhausted,
                (None, Some(_)) => Step::Decided(Ordering::Less),
                (Some(_), None) => Step::Decided(Ordering::Greater),
            },
        }
    }
}

fn head<'a>(a: &'a Value, b: &'a Value, leaf: Leaf) -> Head<'a> {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => Head::Descend(Frame::Items(x.iter(), y.iter())),
        (Value::Object(x), Value::Object(y)) => Head::Descend(entries(x, y)),
        _ => Head::Leaf(leaf(a.element(), b.element())),
    }
}

fn entries<'a>(x: &'a Object, y: &'a Object) -> Frame<'a> {
    Frame::Entries(x.iter(), y.iter())
}

/// Lexicographic walk. An unordered pair of elements does not decide the
/// comparison; the walk moves on and the first ordered difference wins. If
/// there is none, the result is unordered.
fn walk(a: &Value, b: &Value, leaf: Leaf) -> Option<Ordering> {
    let mut stack = match head(a, b, leaf) {
        Head::Leaf(ordering) => return ordering,
        Head::Descend(frame) => vec![frame],
    };
    let mut unordered = false;
    while let Some(frame) = stack.last_mut() {
        match frame.step() {
            Step::Pair(x, y) => match head(x, y, leaf) {
                Head::Leaf(Some(Ordering::Equal)) => {}
                Head::Leaf(Some(decided)) => return Some(decided),
                Head::Leaf(None) => unordered = true,
                Head::Descend(inner) => stack.push(inner),
            },
            Step::Decided(decided) => return Some(decided),
            Step::Exhausted => {
                stack.pop();
            }
        }
    }
    if unordered {
        None
    } else {
        Some(Ordering::Equal)
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

impl PartialEq<f64> for Value {
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        self.as_i32() == Some(*other)
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

impl PartialOrd<&str> for Value {
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        self.as_str().map(|s| s.cmp(*other))
    }
}

impl PartialOrd<f64> for Value {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.as_f64()?.partial_cmp(other)
    }
}

/// `false < true`, as for Rust booleans.
impl PartialOrd<bool> for Value {
    fn partial_cmp(&self, other: &bool) -> Option<Ordering> {
        self.as_bool().map(|b| b.cmp(other))
    }
}
