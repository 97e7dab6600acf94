//! Conversions between preference values and plain JSON.

use std::collections::BTreeSet;

use prefstore_core::{Error, Kind, Value};
use serde_json::{json, Value as JsonValue};

/// Infer a preference value from a JSON value's own runtime kind.
///
/// Numbers become int when they fit `i32`, long when they fit `i64`,
/// float otherwise. The float narrowing to `f32` rounds and saturates:
/// doubles beyond the `f32` range come out as infinities. Arrays must
/// contain only strings and become string sets.
///
/// # Errors
///
/// [`Error::UnsupportedType`] for JSON null and objects;
/// [`Error::TypeMismatch`] for arrays containing a non-string element.
pub fn value_from_json(key: &str, json: &JsonValue) -> Result<Value, Error> {
    match json {
        JsonValue::Null => Err(Error::unsupported("null")),
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i32::try_from(i).map(Value::Int).unwrap_or(Value::Long(i)))
            } else {
                match n.as_f64() {
                    Some(f) => Ok(Value::Float(f as f32)),
                    None => Err(Error::unsupported("number")),
                }
            }
        }
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        JsonValue::Array(items) => {
            let mut set = BTreeSet::new();
            for item in items {
                match item {
                    JsonValue::String(s) => {
                        set.insert(s.clone());
                    }
                    other => {
                        // Elements with a representable kind are a
                        // mismatch; the rest stay unsupported.
                        return match value_from_json(key, other) {
                            Ok(v) => Err(Error::mismatch(key, Kind::StringSet, v.kind())),
                            Err(e) => Err(e),
                        };
                    }
                }
            }
            Ok(Value::StringSet(set))
        }
        JsonValue::Object(_) => Err(Error::unsupported("object")),
    }
}

/// Project a preference value into plain (untagged) JSON.
///
/// String sets render as arrays in their deterministic set order.
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::String(s) => json!(s),
        Value::Int(i) => json!(i),
        Value::Long(l) => json!(l),
        Value::Float(f) => json!(f),
        Value::Bool(b) => json!(b),
        Value::StringSet(set) => json!(set),
    }
}
