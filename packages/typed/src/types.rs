//! The Rust-type to preference-kind mapping.

use std::collections::BTreeSet;

use prefstore_core::{Kind, Value};

mod sealed {
    use std::collections::BTreeSet;

    pub trait Sealed {}

    impl Sealed for String {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for bool {}
    impl Sealed for BTreeSet<String> {}
}

/// A Rust type that maps onto one of the closed preference kinds.
///
/// Sealed: exactly the six payload types implement it, so the
/// inferred-type access path cannot name an unsupported type at all.
/// The dynamic JSON path keeps the runtime
/// [`UnsupportedType`](prefstore_core::Error::UnsupportedType) arm for
/// kinds that only show up at runtime.
pub trait PrefType: sealed::Sealed + Sized {
    /// The kind this type maps to.
    const KIND: Kind;

    /// Wrap into a [`Value`] of [`Self::KIND`].
    fn into_value(self) -> Value;

    /// Unwrap a value of the matching kind; `None` when the kind differs.
    fn from_value(value: Value) -> Option<Self>;
}

impl PrefType for String {
    const KIND: Kind = Kind::String;

    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl PrefType for i32 {
    const KIND: Kind = Kind::Int;

    fn into_value(self) -> Value {
        Value::Int(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(i),
            _ => None,
        }
    }
}

impl PrefType for i64 {
    const KIND: Kind = Kind::Long;

    fn into_value(self) -> Value {
        Value::Long(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Long(l) => Some(l),
            _ => None,
        }
    }
}

impl PrefType for f32 {
    const KIND: Kind = Kind::Float;

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(f),
            _ => None,
        }
    }
}

impl PrefType for bool {
    const KIND: Kind = Kind::Bool;

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl PrefType for BTreeSet<String> {
    const KIND: Kind = Kind::StringSet;

    fn into_value(self) -> Value {
        Value::StringSet(self)
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::StringSet(set) => Some(set),
            _ => None,
        }
    }
}
