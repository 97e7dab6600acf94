//! Slots: typed accessors bound to a fixed key.

use std::sync::Arc;

use prefstore_core::{Error, Preferences};

use crate::accessor::TypedPrefs;
use crate::types::PrefType;

/// A typed accessor bound to one key of one store.
///
/// Constructed once and held by its owner; reads and writes go through
/// the same dispatch as [`TypedPrefs`], against the fixed key.
///
/// # Example
///
/// ```rust,ignore
/// use prefstore_typed::Slot;
///
/// struct Settings {
///     volume: Slot<i32>,
/// }
///
/// let settings = Settings {
///     volume: Slot::with_default(store.clone(), "volume", 50),
/// };
/// settings.volume.set(80)?;
/// assert_eq!(settings.volume.get()?, Some(80));
/// ```
pub struct Slot<T> {
    prefs: Arc<dyn Preferences>,
    key: String,
    default: Option<T>,
}

impl<T: PrefType + Clone> Slot<T> {
    /// Bind `key` with no default; absent reads take the sentinel path.
    pub fn new(prefs: Arc<dyn Preferences>, key: impl Into<String>) -> Self {
        Slot {
            prefs,
            key: key.into(),
            default: None,
        }
    }

    /// Bind `key` with a default returned for absent reads.
    pub fn with_default(
        prefs: Arc<dyn Preferences>,
        key: impl Into<String>,
        default: T,
    ) -> Self {
        Slot {
            prefs,
            key: key.into(),
            default: Some(default),
        }
    }

    /// The bound key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the bound value.
    ///
    /// Absent keys yield the bound default when one exists, otherwise
    /// the kind's sentinel path (see [`TypedPrefs::get_as`]).
    pub fn get(&self) -> Result<Option<T>, Error> {
        match &self.default {
            Some(default) => self
                .prefs
                .get_as_or(&self.key, default.clone())
                .map(Some),
            None => self.prefs.get_as(&self.key),
        }
    }

    /// Write the bound value (apply semantics).
    pub fn set(&self, value: T) -> Result<(), Error> {
        self.prefs.set_as(&self.key, value)
    }
}
