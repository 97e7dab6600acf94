//! Typed reader and writer extension methods.

use prefstore_core::{Error, Kind, Preferences, Value};
use serde_json::Value as JsonValue;

use crate::convert;
use crate::types::PrefType;

/// Kind-dispatched access to a preference store.
///
/// This trait is automatically implemented for every [`Preferences`]
/// store. The explicit-kind methods (`get`, `get_or`, `set`) and the
/// inferred-type methods (`get_as`, `get_as_or`, `set_as`) are two views
/// of the same dispatch and always agree.
///
/// # Example
///
/// ```rust,ignore
/// use prefstore_core::Kind;
/// use prefstore_typed::TypedPrefs;
///
/// store.set("volume", Kind::Int, 7i32.into())?;
/// assert_eq!(store.get("volume", Kind::Int)?, Some(7i32.into()));
/// // absent key, no default: the int sentinel
/// assert_eq!(store.get("missing", Kind::Int)?, Some((-1i32).into()));
/// ```
pub trait TypedPrefs: Preferences + Sized {
    /// Typed read with no default supplied.
    ///
    /// A present key returns the stored value. An absent key falls back
    /// to the kind's sentinel default: `-1` for int/long, `-1.0` for
    /// float, `false` for bool, and nothing for the nullable kinds
    /// (string, string-set).
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when the stored value carries a different
    /// kind than requested.
    fn get(&self, key: &str, kind: Kind) -> Result<Option<Value>, Error> {
        match self.read(key)? {
            Some(found) if found.kind() == kind => Ok(Some(found)),
            Some(found) => Err(Error::mismatch(key, kind, found.kind())),
            None => Ok(kind.sentinel()),
        }
    }

    /// Typed read with an explicitly supplied default.
    ///
    /// An absent key returns `default` as-is - `None` included, never
    /// the sentinel. That asymmetry against [`get`](TypedPrefs::get) is
    /// deliberate: supplying a default, even a null one, takes the
    /// store's own default-substitution path.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when the stored value or the supplied
    /// default carries a different kind than requested.
    fn get_or(
        &self,
        key: &str,
        kind: Kind,
        default: Option<Value>,
    ) -> Result<Option<Value>, Error> {
        if let Some(d) = &default {
            if d.kind() != kind {
                return Err(Error::mismatch(key, kind, d.kind()));
            }
        }
        match self.read(key)? {
            Some(found) if found.kind() == kind => Ok(Some(found)),
            Some(found) => Err(Error::mismatch(key, kind, found.kind())),
            None => Ok(default),
        }
    }

    /// Inferred-type read; the kind comes from `T`.
    ///
    /// Same semantics as [`get`](TypedPrefs::get) with `T::KIND`.
    fn get_as<T: PrefType>(&self, key: &str) -> Result<Option<T>, Error> {
        match self.read(key)? {
            Some(found) => {
                let kind = found.kind();
                T::from_value(found)
                    .map(Some)
                    .ok_or_else(|| Error::mismatch(key, T::KIND, kind))
            }
            None => Ok(T::KIND.sentinel().and_then(T::from_value)),
        }
    }

    /// Inferred-type read with a default; an absent key returns
    /// `default`.
    fn get_as_or<T: PrefType>(&self, key: &str, default: T) -> Result<T, Error> {
        match self.read(key)? {
            Some(found) => {
                let kind = found.kind();
                T::from_value(found).ok_or_else(|| Error::mismatch(key, T::KIND, kind))
            }
            None => Ok(default),
        }
    }

    /// Dynamic read: the stored value projected to untagged JSON.
    fn get_json(&self, key: &str) -> Result<Option<JsonValue>, Error> {
        Ok(self.read(key)?.map(|v| convert::value_to_json(&v)))
    }

    /// Explicit-kind write.
    ///
    /// Opens an editor session, queues exactly one put and finalizes it
    /// with apply semantics before returning.
    ///
    /// # Errors
    ///
    /// [`Error::TypeMismatch`] when `value` does not carry `kind`.
    fn set(&self, key: &str, kind: Kind, value: Value) -> Result<(), Error> {
        if value.kind() != kind {
            return Err(Error::mismatch(key, kind, value.kind()));
        }
        let mut editor = self.edit();
        editor.put_value(key, value);
        editor.apply();
        Ok(())
    }

    /// Inferred-kind write; agrees with [`set`](TypedPrefs::set).
    fn set_as<T: PrefType>(&self, key: &str, value: T) -> Result<(), Error> {
        self.set(key, T::KIND, value.into_value())
    }

    /// Dynamic write; the kind is inferred from the JSON value itself.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedType`] for JSON null and objects;
    /// [`Error::TypeMismatch`] for arrays containing a non-string
    /// element.
    fn set_json(&self, key: &str, json: &JsonValue) -> Result<(), Error> {
        let value = convert::value_from_json(key, json)?;
        self.set(key, value.kind(), value)
    }

    /// Remove any entry under the key (apply semantics).
    fn remove(&self, key: &str) {
        let mut editor = self.edit();
        editor.remove(key);
        editor.apply();
    }

    /// Remove every entry (apply semantics).
    fn clear(&self) {
        let mut editor = self.edit();
        editor.clear();
        editor.apply();
    }
}

// Blanket implementation for all stores
impl<P: Preferences> TypedPrefs for P {}
