//! JSON value types produced by the decoder.
//!
//! This module defines the [`Value`] enum, which represents any decoded JSON
//! value, and the escaping helpers behind its `Display` impl.
//!
use alloc::{
    collections::{BTreeMap, btree_map},
    string::String,
    vec::Vec,
};
use core::{mem, slice};

/// The container type for decoded objects.
///
/// Members are kept sorted by name, not in the order they were read. A
/// repeated name keeps the last value.
pub type Map = BTreeMap<String, Value>;
/// The container type for decoded arrays.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// Integer literals that cannot be represented exactly by an `f64` are
/// decoded as [`Value::String`] carrying the original digits, so the text of
/// large identifiers survives decoding unchanged.
///
/// Cloning and dropping work on values of any nesting depth. Comparison,
/// `Debug`, `Display` and serialization recurse once per level.
///
/// # Examples
///
/// ```
/// use jsonfeed::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, PartialEq)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// A number that an `f64` holds without changing its text.
    Number(f64),
    /// A string, or the digits of an integer too large for an `f64`.
    String(String),
    /// An array.
    Array(Array),
    /// An object.
    Object(Map),
}

impl Value {
    fn has_nested(&self) -> bool {
        let nested = |v: &Value| match v {
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            _ => false,
        };
        match self {
            Value::Array(items) => items.iter().any(nested),
            Value::Object(map) => map.values().any(nested),
            _ => false,
        }
    }

    fn take_children(&mut self, into: &mut Vec<Value>) {
        match self {
            Value::Array(items) => into.append(items),
            Value::Object(map) => into.extend(mem::take(map).into_values()),
            _ => {}
        }
    }
}

/// A container being copied by [`Value::clone`].
struct Partial<'a> {
    children: Children<'a>,
    copy: Value,
    name: Option<String>,
}

enum Children<'a> {
    Items(slice::Iter<'a, Value>),
    Members(btree_map::Iter<'a, String, Value>),
}

impl<'a> Children<'a> {
    fn next_child(&mut self) -> Option<(Option<String>, &'a Value)> {
        match self {
            Children::Items(items) => items.next().map(|v| (None, v)),
            Children::Members(members) => members.next().map(|(k, v)| (Some(k.clone()), v)),
        }
    }
}

impl Partial<'_> {
    fn store(&mut self, name: Option<String>, child: Value) {
        match (&mut self.copy, name) {
            (Value::Array(items), _) => items.push(child),
            (Value::Object(map), Some(name)) => {
                map.insert(name, child);
            }
            _ => {}
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        let mut open: Vec<Partial<'_>> = Vec::new();
        let mut source = self;
        let mut name = None;
        loop {
            let mut finished = match source {
                Value::Array(items) if !items.is_empty() => {
                    open.push(Partial {
                        children: Children::Items(items.iter()),
                        copy: Value::Array(Vec::with_capacity(items.len())),
                        name,
                    });
                    None
                }
                Value::Object(map) if !map.is_empty() => {
                    open.push(Partial {
                        children: Children::Members(map.iter()),
                        copy: Value::Object(Map::new()),
                        name,
                    });
                    None
                }
                Value::Null => Some((name, Value::Null)),
                Value::Boolean(b) => Some((name, Value::Boolean(*b))),
                Value::Number(n) => Some((name, Value::Number(*n))),
                Value::String(s) => Some((name, Value::String(s.clone()))),
                Value::Array(_) => Some((name, Value::Array(Vec::new()))),
                Value::Object(_) => Some((name, Value::Object(Map::new()))),
            };

            loop {
                let Some(top) = open.last_mut() else {
                    return finished.map_or(Value::Null, |(_, copy)| copy);
                };
                if let Some((child_name, copy)) = finished.take() {
                    top.store(child_name, copy);
                }
                if let Some((child_name, child)) = top.children.next_child() {
                    name = child_name;
                    source = child;
                    break;
                }
                finished = open.pop().map(|done| (done.name, done.copy));
            }
        }
    }
}

// Nesting depth is unbounded, so children are released from a heap work list
// instead of by recursion.
impl Drop for Value {
    fn drop(&mut self) {
        if !self.has_nested() {
            return;
        }
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.take_children(&mut pending);
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonfeed::{Map, Value};
    ///
    /// assert!(Value::Object(Map::new()).is_object());
    /// assert!(!Value::Array(vec![]).is_object());
    /// ```
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns the boolean if the value is a [`Value::Boolean`].
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if the value is a [`Value::Number`].
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if the value is a [`Value::String`].
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if the value is a [`Value::Array`].
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the members if the value is a [`Value::Object`].
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes, control characters (<= U+001F) and the Unicode line
/// separators are written as JSON escape sequences.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{2028}' | '\u{2029}' => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            c if c.is_ascii_control() || c.is_control() && c as u32 <= 0xFFFF => {
                write!(f, "\\u{:04X}", c as u32)?;
            }
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

struct Escaped<'a>(&'a str);

impl core::fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_escaped_string(self.0, f)
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            // JSON has no spelling for NaN or the infinities.
            Value::Number(n) if !n.is_finite() => f.write_str("null"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "\"{}\"", Escaped(s)),
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "\"{}\":{}", Escaped(k), v)?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn display_escapes_control_characters() {
        let v = Value::String("a\"b\\c\n\u{2028}".into());
        assert_eq!(v.to_string(), r#""a\"b\\c\u000A\u2028""#);
    }

    #[test]
    fn display_nested() {
        let mut map = Map::new();
        map.insert("b".into(), Value::Array(vec![Value::Number(1.5), Value::Null]));
        map.insert("a".into(), Value::Boolean(true));
        assert_eq!(Value::Object(map).to_string(), r#"{"a":true,"b":[1.5,null]}"#);
    }

    fn nested_arrays(depth: usize) -> Value {
        let mut value = Value::Array(vec![]);
        for _ in 1..depth {
            value = Value::Array(vec![value]);
        }
        value
    }

    fn depth_of(mut value: &Value) -> usize {
        let mut depth = 0;
        while let Value::Array(items) = value {
            depth += 1;
            match items.first() {
                Some(child) => value = child,
                None => break,
            }
        }
        depth
    }

    #[test]
    fn deep_values_clone_and_drop() {
        let depth = if cfg!(miri) { 1_000 } else { 1_000_000 };
        let value = nested_arrays(depth);
        let copy = value.clone();
        drop(value);
        assert_eq!(depth_of(&copy), depth);
    }

    #[test]
    fn clone_keeps_members_and_order() {
        let mut inner = Map::new();
        inner.insert("x".into(), Value::String("y".into()));
        inner.insert("e".into(), Value::Array(vec![]));
        let mut map = Map::new();
        map.insert(
            "n".into(),
            Value::Array(vec![Value::Number(1.0), Value::Object(inner), Value::Null]),
        );
        map.insert("b".into(), Value::Boolean(false));
        let value = Value::Object(map);
        assert_eq!(value.clone(), value);
        assert_eq!(
            value.clone().to_string(),
            r#"{"b":false,"n":[1,{"e":[],"x":"y"},null]}"#
        );
    }

    #[test]
    fn members_are_ordered_by_name() {
        let mut map = Map::new();
        map.insert("b".into(), Value::Number(1.0));
        map.insert("a".into(), Value::Number(2.0));
        assert_eq!(Value::Object(map).to_string(), r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn non_finite_numbers_render_as_null() {
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "null");
    }
}
