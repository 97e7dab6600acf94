//! Tagged JSON encoding of preference values.
//!
//! Each on-disk entry is a single-key object naming its kind:
//! `{"int": 5}`, `{"string_set": ["a", "b"]}`. The tag keeps int, long
//! and float apart, which plain JSON numbers cannot. Float payloads
//! narrow to `f32` with rounding and saturation: a double beyond the
//! `f32` range decodes as an infinity.

use prefstore_core::{Error, Kind, Value};
use serde_json::{json, Value as JsonValue};

pub(crate) fn to_tagged(value: &Value) -> JsonValue {
    match value {
        Value::String(s) => json!({ "string": s }),
        Value::Int(i) => json!({ "int": i }),
        Value::Long(l) => json!({ "long": l }),
        Value::Float(f) => json!({ "float": f }),
        Value::Bool(b) => json!({ "bool": b }),
        Value::StringSet(set) => json!({ "string_set": set }),
    }
}

pub(crate) fn from_tagged(key: &str, json: &JsonValue) -> Result<Value, Error> {
    let Some(obj) = json.as_object() else {
        return Err(malformed(key, "entry is not an object"));
    };

    let mut fields = obj.iter();
    let (tag, payload) = match (fields.next(), fields.next()) {
        (Some(entry), None) => entry,
        _ => return Err(malformed(key, "entry must have exactly one tag")),
    };

    match tag.as_str() {
        "string" => payload
            .as_str()
            .map(Value::from)
            .ok_or_else(|| malformed(key, "string payload")),
        "int" => payload
            .as_i64()
            .and_then(|i| i32::try_from(i).ok())
            .map(Value::Int)
            .ok_or_else(|| malformed(key, "int payload")),
        "long" => payload
            .as_i64()
            .map(Value::Long)
            .ok_or_else(|| malformed(key, "long payload")),
        "float" => payload
            .as_f64()
            .map(|f| Value::Float(f as f32))
            .ok_or_else(|| malformed(key, "float payload")),
        "bool" => payload
            .as_bool()
            .map(Value::Bool)
            .ok_or_else(|| malformed(key, "bool payload")),
        "string_set" => {
            let Some(items) = payload.as_array() else {
                return Err(malformed(key, "string_set payload"));
            };
            let mut set = std::collections::BTreeSet::new();
            for item in items {
                match item {
                    JsonValue::String(s) => {
                        set.insert(s.clone());
                    }
                    other => {
                        return Err(Error::mismatch(
                            key,
                            Kind::StringSet,
                            scalar_kind(other).ok_or_else(|| {
                                malformed(key, "string_set element")
                            })?,
                        ));
                    }
                }
            }
            Ok(Value::StringSet(set))
        }
        other => Err(Error::unsupported(other)),
    }
}

/// Kind a JSON scalar would carry, if any.
fn scalar_kind(json: &JsonValue) -> Option<Kind> {
    match json {
        JsonValue::Bool(_) => Some(Kind::Bool),
        JsonValue::Number(n) if n.is_i64() => Some(Kind::Int),
        JsonValue::Number(_) => Some(Kind::Float),
        JsonValue::String(_) => Some(Kind::String),
        _ => None,
    }
}

fn malformed(key: &str, what: &str) -> Error {
    Error::store(format!("malformed entry for key \"{key}\": {what}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn tagged_round_trip() {
        let set: BTreeSet<String> = ["a".to_string(), "b".to_string()].into_iter().collect();
        let values = [
            Value::String("s".to_string()),
            Value::Int(-1),
            Value::Long(5_000_000_000),
            Value::Float(0.5),
            Value::Bool(true),
            Value::StringSet(set),
        ];

        for value in values {
            let tagged = to_tagged(&value);
            assert_eq!(from_tagged("k", &tagged).unwrap(), value);
        }
    }

    #[test]
    fn int_and_long_stay_distinct() {
        assert_eq!(to_tagged(&Value::Int(5)), json!({ "int": 5 }));
        assert_eq!(to_tagged(&Value::Long(5)), json!({ "long": 5 }));
        assert_ne!(
            from_tagged("k", &json!({ "int": 5 })).unwrap(),
            from_tagged("k", &json!({ "long": 5 })).unwrap()
        );
    }

    #[test]
    fn oversized_float_payload_saturates() {
        assert_eq!(
            from_tagged("k", &json!({ "float": 1e39 })).unwrap(),
            Value::Float(f32::INFINITY)
        );
    }

    #[test]
    fn unknown_tag_is_unsupported() {
        let e = from_tagged("k", &json!({ "uuid": "abc" })).unwrap_err();
        match e {
            Error::UnsupportedType { type_name } => assert_eq!(type_name, "uuid"),
            other => panic!("expected UnsupportedType, got {:?}", other),
        }
    }

    #[test]
    fn non_string_set_element_is_a_mismatch() {
        let e = from_tagged("k", &json!({ "string_set": ["a", 3] })).unwrap_err();
        assert!(matches!(
            e,
            Error::TypeMismatch {
                expected: Kind::StringSet,
                found: Kind::Int,
                ..
            }
        ));
    }

    #[test]
    fn malformed_entries_surface_store_errors() {
        assert!(matches!(
            from_tagged("k", &json!(5)).unwrap_err(),
            Error::Store(_)
        ));
        assert!(matches!(
            from_tagged("k", &json!({ "int": "five" })).unwrap_err(),
            Error::Store(_)
        ));
        assert!(matches!(
            from_tagged("k", &json!({ "int": 1, "long": 2 })).unwrap_err(),
            Error::Store(_)
        ));
    }
}
