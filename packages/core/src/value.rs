//! The Value type - a single typed preference entry.

use std::collections::BTreeSet;
use std::fmt;

/// The closed set of kinds a preference value can take.
///
/// This set is fixed. Anything outside it is rejected with
/// [`Error::UnsupportedType`](crate::Error::UnsupportedType), never
/// silently coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// UTF-8 string.
    String,
    /// 32-bit signed integer.
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit floating point.
    Float,
    /// Boolean.
    Bool,
    /// Unordered set of strings.
    StringSet,
}

impl Kind {
    /// The fixed fallback used when no explicit default is given.
    ///
    /// `-1` for int/long, `-1.0` for float, `false` for bool. The
    /// nullable kinds (string, string-set) have no sentinel and fall
    /// back to nothing.
    pub fn sentinel(self) -> Option<Value> {
        match self {
            Kind::String | Kind::StringSet => None,
            Kind::Int => Some(Value::Int(-1)),
            Kind::Long => Some(Value::Long(-1)),
            Kind::Float => Some(Value::Float(-1.0)),
            Kind::Bool => Some(Value::Bool(false)),
        }
    }

    /// Stable lowercase name, also used as the on-disk entry tag.
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Int => "int",
            Kind::Long => "long",
            Kind::Float => "float",
            Kind::Bool => "bool",
            Kind::StringSet => "string_set",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single preference value.
///
/// # Design Notes
///
/// - One variant per [`Kind`]; `Value::kind` is total.
/// - `BTreeSet` for string sets keeps snapshots and the on-disk form
///   deterministic.
/// - The integer and float widths (`i32`/`i64`/`f32`) match the wrapped
///   store's primitive widths.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// UTF-8 string.
    String(String),
    /// 32-bit signed integer.
    Int(i32),
    /// 64-bit signed integer.
    Long(i64),
    /// 32-bit floating point.
    Float(f32),
    /// Boolean.
    Bool(bool),
    /// Unordered set of strings.
    StringSet(BTreeSet<String>),
}

impl Value {
    /// The kind this value carries.
    pub fn kind(&self) -> Kind {
        match self {
            Value::String(_) => Kind::String,
            Value::Int(_) => Kind::Int,
            Value::Long(_) => Kind::Long,
            Value::Float(_) => Kind::Float,
            Value::Bool(_) => Kind::Bool,
            Value::StringSet(_) => Kind::StringSet,
        }
    }
}

// Conversion from the payload types

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Long(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<BTreeSet<String>> for Value {
    fn from(v: BTreeSet<String>) -> Self {
        Value::StringSet(v)
    }
}
