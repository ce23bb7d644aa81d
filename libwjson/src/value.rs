//! JSON value representation.

use crate::decimal::Decimal;
use crate::encode::{write_json, NumberFormat};
use indexmap::IndexMap;
use std::borrow::Borrow;
use std::fmt;

/// Object members in insertion order.
pub type Map = IndexMap<Utf16String, Value>;

/// A string as a sequence of UTF-16 code units.
///
/// Unpaired surrogates are representable, since `\uXXXX` escapes produce
/// raw code units.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utf16String(Vec<u16>);

impl Utf16String {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn as_units(&self) -> &[u16] {
        &self.0
    }

    pub fn into_units(self) -> Vec<u16> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, unit: u16) {
        self.0.push(unit);
    }

    /// Decode to a Rust string, replacing unpaired surrogates with U+FFFD.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf16_lossy(&self.0)
    }

    /// Decode to a Rust string, or `None` if it holds unpaired surrogates.
    pub fn to_string_checked(&self) -> Option<String> {
        String::from_utf16(&self.0).ok()
    }
}

impl Borrow<[u16]> for Utf16String {
    fn borrow(&self) -> &[u16] {
        &self.0
    }
}

impl From<&str> for Utf16String {
    fn from(s: &str) -> Self {
        Self(s.encode_utf16().collect())
    }
}

impl From<String> for Utf16String {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Vec<u16>> for Utf16String {
    fn from(units: Vec<u16>) -> Self {
        Self(units)
    }
}

impl From<&[u16]> for Utf16String {
    fn from(units: &[u16]) -> Self {
        Self(units.to_vec())
    }
}

impl PartialEq<str> for Utf16String {
    fn eq(&self, other: &str) -> bool {
        self.0.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for Utf16String {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl fmt::Debug for Utf16String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_string_checked() {
            Some(s) => write!(f, "{:?}", s),
            None => write!(f, "utf16{:04x?}", self.0),
        }
    }
}

impl fmt::Display for Utf16String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

/// A JSON value.
#[derive(Clone)]
pub enum Value {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer that fits in 32 bits.
    Int32(i32),
    /// Integer that fits in 64 bits but not 32.
    Int64(i64),
    /// Exact decimal: fractional literals and integers beyond 64 bits.
    Decimal(Decimal),
    /// Double: exponent literals and `Infinity`/`NaN`.
    Float(f64),
    /// UTF-16 string.
    Str(Utf16String),
    /// Array of values.
    Array(Vec<Value>),
    /// Object in insertion order.
    Object(Map),
}

impl Value {
    /// Returns `true` if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean value if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int32`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int32(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int32` or `Int64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(n) => Some(*n as i64),
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns a reference to the decimal if this is a `Decimal`.
    pub fn as_decimal(&self) -> Option<&Decimal> {
        match self {
            Value::Decimal(d) => Some(d),
            _ => None,
        }
    }

    /// Returns any numeric variant as a double.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int32(n) => Some(*n as f64),
            Value::Int64(n) => Some(*n as f64),
            Value::Decimal(d) => Some(d.to_f64()),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a `Str`.
    pub fn as_str(&self) -> Option<&Utf16String> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an `Array`.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an `Object`.
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up an object member by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        let units: Vec<u16> = key.encode_utf16().collect();
        self.as_object()?.get(units.as_slice())
    }
}

/// Structural equality. Objects compare member by member in order, so two
/// objects with the same members in a different order are not equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Decimal(a), Value::Decimal(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|((ka, va), (kb, vb))| ka == kb && va == vb)
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int32(n) => write!(f, "{}i32", n),
            Value::Int64(n) => write!(f, "{}i64", n),
            Value::Decimal(d) => write!(f, "{:?}", d),
            Value::Float(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    if *n > 0.0 {
                        write!(f, "Infinity")
                    } else {
                        write!(f, "-Infinity")
                    }
                } else {
                    write!(f, "{:?}f64", n)
                }
            }
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Array(arr) => f.debug_list().entries(arr).finish(),
            Value::Object(obj) => f.debug_map().entries(obj).finish(),
        }
    }
}

/// Compact JSON text with the default number format.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_json(f, self, NumberFormat::default())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

/// Narrows to `Int32` when the integer fits, as the parser would.
impl From<i64> for Value {
    fn from(n: i64) -> Self {
        match i32::try_from(n) {
            Ok(small) => Value::Int32(small),
            Err(_) => Value::Int64(n),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<Utf16String> for Value {
    fn from(s: Utf16String) -> Self {
        Value::Str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<Map> for Value {
    fn from(obj: Map) -> Self {
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(pairs: &[(&str, Value)]) -> Value {
        Value::Object(
            pairs
                .iter()
                .map(|(k, v)| (Utf16String::from(*k), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_utf16_string_roundtrip() {
        let s = Utf16String::from("caf\u{e9} \u{1F600}");
        assert_eq!(s.len(), 7);
        assert_eq!(s.to_string_checked().as_deref(), Some("caf\u{e9} \u{1F600}"));
        assert_eq!(s, "caf\u{e9} \u{1F600}");
    }

    #[test]
    fn test_utf16_string_lone_surrogate() {
        let s = Utf16String::from(vec![0x61, 0xDC00]);
        assert_eq!(s.to_string_checked(), None);
        assert_eq!(s.to_string_lossy(), "a\u{FFFD}");
        assert_eq!(format!("{:?}", s), "utf16[0061, dc00]");
    }

    #[test]
    fn test_accessors() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Int32(7).as_i64(), Some(7));
        assert_eq!(Value::Int64(1 << 40).as_i32(), None);
        assert_eq!(Value::Decimal(Decimal::new(25, 1)).as_f64(), Some(2.5));
        assert_eq!(Value::from("x").as_str().map(|s| s.to_string_lossy()), Some("x".into()));
        assert!(Value::Array(vec![]).as_array().unwrap().is_empty());
    }

    #[test]
    fn test_from_i64_narrows() {
        assert_eq!(Value::from(5i64), Value::Int32(5));
        assert_eq!(Value::from(1i64 << 40), Value::Int64(1 << 40));
    }

    #[test]
    fn test_get_member() {
        let obj = object(&[("a", Value::Int32(1)), ("\u{e9}", Value::Null)]);
        assert_eq!(obj.get("a"), Some(&Value::Int32(1)));
        assert_eq!(obj.get("\u{e9}"), Some(&Value::Null));
        assert_eq!(obj.get("missing"), None);
        assert_eq!(Value::Null.get("a"), None);
    }

    #[test]
    fn test_object_equality_is_order_sensitive() {
        let ab = object(&[("a", Value::Int32(1)), ("b", Value::Int32(2))]);
        let ba = object(&[("b", Value::Int32(2)), ("a", Value::Int32(1))]);
        assert_eq!(ab, ab.clone());
        assert_ne!(ab, ba);
    }

    #[test]
    fn test_numeric_variants_are_distinct() {
        assert_ne!(Value::Int32(1), Value::Int64(1));
        assert_ne!(Value::Int32(1), Value::Float(1.0));
        assert_ne!(Value::Decimal(Decimal::new(1, 0)), Value::Int32(1));
    }

    #[test]
    fn test_debug_format() {
        let v = Value::Array(vec![
            Value::Int32(1),
            Value::Int64(1 << 40),
            Value::Float(f64::NEG_INFINITY),
            Value::Decimal(Decimal::new(15, 1)),
        ]);
        assert_eq!(
            format!("{:?}", v),
            "[1i32, 1099511627776i64, -Infinity, Decimal(1.5)]"
        );
    }
}
