//! Store traits: PrefsReader, PrefsWriter, Preferences.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::editor::{Batch, Editor};
use crate::error::Error;
use crate::value::Value;

/// Read access to a preference store.
///
/// Keys are opaque strings; stores serialize their own access.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn PrefsReader>`.
pub trait PrefsReader: Send + Sync {
    /// Read the value stored under a key.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - no entry under the key.
    /// * `Ok(Some(value))` - the stored value.
    /// * `Err(Error)` - a store-level failure.
    fn read(&self, key: &str) -> Result<Option<Value>, Error>;

    /// Whether any value is stored under the key.
    fn contains(&self, key: &str) -> Result<bool, Error> {
        Ok(self.read(key)?.is_some())
    }

    /// A full snapshot of all entries.
    fn snapshot(&self) -> Result<BTreeMap<String, Value>, Error>;
}

/// Write access to a preference store.
///
/// Writes only arrive as finalized [`Batch`]es; stores replay a batch in
/// order under their own locking.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn PrefsWriter>`.
pub trait PrefsWriter: Send + Sync {
    /// Finalize a batch asynchronously (fire-and-forget).
    ///
    /// The caller does not observe completion or failure. Stores make
    /// applied writes visible to subsequent reads per their own
    /// consistency contract and log write failures instead of surfacing
    /// them.
    fn apply(&self, batch: Batch);

    /// Finalize a batch synchronously, surfacing failures.
    fn commit(&self, batch: Batch) -> Result<(), Error>;
}

/// Combined read/write store with editor-session conveniences.
///
/// Blanket-implemented for anything that is both a [`PrefsReader`] and a
/// [`PrefsWriter`]. The convenience methods are `Sized`-gated, so the
/// trait stays usable as `dyn Preferences`.
pub trait Preferences: PrefsReader + PrefsWriter {
    /// Open a new editor session against this store.
    fn edit(&self) -> Editor<'_>
    where
        Self: Sized,
    {
        Editor::new(self)
    }

    /// Run `action` inside a fresh editor session and finalize once.
    ///
    /// On `Ok`, the session is finalized - synchronously when `commit`
    /// is true (failures surfaced), fire-and-forget otherwise. On `Err`,
    /// the error propagates and the session is never finalized: the
    /// queued writes are discarded and none of them become observable.
    ///
    /// ```rust,ignore
    /// store.edit_with(false, |editor| {
    ///     editor.put_string("theme", "dark");
    ///     editor.put_bool("auto_save", true);
    ///     Ok(())
    /// })?;
    /// ```
    fn edit_with<F>(&self, commit: bool, action: F) -> Result<(), Error>
    where
        Self: Sized,
        F: FnOnce(&mut Editor<'_>) -> Result<(), Error>,
    {
        let mut editor = Editor::new(self);
        action(&mut editor)?;
        if commit {
            editor.commit()
        } else {
            editor.apply();
            Ok(())
        }
    }
}

impl<T: PrefsReader + PrefsWriter> Preferences for T {}

// Blanket implementations for references, boxes and arcs

impl<T: PrefsReader + ?Sized> PrefsReader for &T {
    fn read(&self, key: &str) -> Result<Option<Value>, Error> {
        (**self).read(key)
    }

    fn contains(&self, key: &str) -> Result<bool, Error> {
        (**self).contains(key)
    }

    fn snapshot(&self) -> Result<BTreeMap<String, Value>, Error> {
        (**self).snapshot()
    }
}

impl<T: PrefsWriter + ?Sized> PrefsWriter for &T {
    fn apply(&self, batch: Batch) {
        (**self).apply(batch)
    }

    fn commit(&self, batch: Batch) -> Result<(), Error> {
        (**self).commit(batch)
    }
}

impl<T: PrefsReader + ?Sized> PrefsReader for Box<T> {
    fn read(&self, key: &str) -> Result<Option<Value>, Error> {
        self.as_ref().read(key)
    }

    fn contains(&self, key: &str) -> Result<bool, Error> {
        self.as_ref().contains(key)
    }

    fn snapshot(&self) -> Result<BTreeMap<String, Value>, Error> {
        self.as_ref().snapshot()
    }
}

impl<T: PrefsWriter + ?Sized> PrefsWriter for Box<T> {
    fn apply(&self, batch: Batch) {
        self.as_ref().apply(batch)
    }

    fn commit(&self, batch: Batch) -> Result<(), Error> {
        self.as_ref().commit(batch)
    }
}

impl<T: PrefsReader + ?Sized> PrefsReader for Arc<T> {
    fn read(&self, key: &str) -> Result<Option<Value>, Error> {
        self.as_ref().read(key)
    }

    fn contains(&self, key: &str) -> Result<bool, Error> {
        self.as_ref().contains(key)
    }

    fn snapshot(&self) -> Result<BTreeMap<String, Value>, Error> {
        self.as_ref().snapshot()
    }
}

impl<T: PrefsWriter + ?Sized> PrefsWriter for Arc<T> {
    fn apply(&self, batch: Batch) {
        self.as_ref().apply(batch)
    }

    fn commit(&self, batch: Batch) -> Result<(), Error> {
        self.as_ref().commit(batch)
    }
}
