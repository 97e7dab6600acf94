//! In-memory preference store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use prefstore_core::{Batch, Error, Op, PrefsReader, PrefsWriter, Value};

/// An in-memory store.
///
/// `apply` and `commit` coincide; nothing is durable. Useful for tests
/// and ephemeral configuration.
///
/// # Example
///
/// ```rust,ignore
/// use prefstore_core::{Preferences, Value};
/// use prefstore_json_store::InMemoryPrefs;
///
/// let store = InMemoryPrefs::new();
/// store.edit_with(true, |editor| {
///     editor.put_string("name", "Alice");
///     Ok(())
/// })?;
/// assert_eq!(store.read("name")?, Some(Value::String("Alice".to_string())));
/// ```
#[derive(Default)]
pub struct InMemoryPrefs {
    entries: Mutex<BTreeMap<String, Value>>,
}

impl InMemoryPrefs {
    /// Create a new empty store.
    pub fn new() -> Self {
        InMemoryPrefs::default()
    }

    /// Create a store seeded with initial entries.
    pub fn with_entries(entries: BTreeMap<String, Value>) -> Self {
        InMemoryPrefs {
            entries: Mutex::new(entries),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        // A poisoned map is still structurally sound; keep serving it.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn replay(&self, batch: Batch) {
        let mut entries = self.lock();
        for op in batch {
            match op {
                Op::Put { key, value } => {
                    entries.insert(key, value);
                }
                Op::Remove { key } => {
                    entries.remove(&key);
                }
                Op::Clear => entries.clear(),
            }
        }
    }
}

impl PrefsReader for InMemoryPrefs {
    fn read(&self, key: &str) -> Result<Option<Value>, Error> {
        Ok(self.lock().get(key).cloned())
    }

    fn snapshot(&self) -> Result<BTreeMap<String, Value>, Error> {
        Ok(self.lock().clone())
    }
}

impl PrefsWriter for InMemoryPrefs {
    fn apply(&self, batch: Batch) {
        self.replay(batch);
    }

    fn commit(&self, batch: Batch) -> Result<(), Error> {
        self.replay(batch);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefstore_core::Preferences;

    #[test]
    fn basic_write_read() {
        let store = InMemoryPrefs::new();

        store
            .edit_with(true, |editor| {
                editor.put_string("foo", "bar");
                Ok(())
            })
            .unwrap();

        assert_eq!(
            store.read("foo").unwrap(),
            Some(Value::String("bar".to_string()))
        );
    }

    #[test]
    fn read_nonexistent_returns_none() {
        let store = InMemoryPrefs::new();
        assert_eq!(store.read("nonexistent").unwrap(), None);
        assert!(!store.contains("nonexistent").unwrap());
    }

    #[test]
    fn overwrite_works() {
        let store = InMemoryPrefs::new();

        store
            .edit_with(true, |editor| {
                editor.put_int("value", 1);
                Ok(())
            })
            .unwrap();
        store
            .edit_with(true, |editor| {
                editor.put_int("value", 2);
                Ok(())
            })
            .unwrap();

        assert_eq!(store.read("value").unwrap(), Some(Value::Int(2)));
    }

    #[test]
    fn clear_then_put_keeps_batch_order() {
        let store = InMemoryPrefs::new();
        store
            .edit_with(true, |editor| {
                editor.put_int("old", 1);
                Ok(())
            })
            .unwrap();

        store
            .edit_with(true, |editor| {
                editor.clear().put_int("new", 2);
                Ok(())
            })
            .unwrap();

        assert_eq!(store.read("old").unwrap(), None);
        assert_eq!(store.read("new").unwrap(), Some(Value::Int(2)));
    }

    #[test]
    fn failed_action_leaves_the_store_untouched() {
        let store = InMemoryPrefs::new();

        let result = store.edit_with(false, |editor| {
            editor.put_int("a", 1).put_int("b", 2);
            Err(Error::unsupported("abort"))
        });

        assert!(result.is_err());
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn with_entries_constructor() {
        let mut seed = BTreeMap::new();
        seed.insert("key".to_string(), Value::String("value".to_string()));

        let store = InMemoryPrefs::with_entries(seed);
        assert_eq!(
            store.read("key").unwrap(),
            Some(Value::String("value".to_string()))
        );
    }

    #[test]
    fn snapshot_returns_all_entries() {
        let store = InMemoryPrefs::new();
        store
            .edit_with(true, |editor| {
                editor.put_int("a", 1).put_bool("b", true);
                Ok(())
            })
            .unwrap();

        let snapshot = store.snapshot().unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("a"), Some(&Value::Int(1)));
        assert_eq!(snapshot.get("b"), Some(&Value::Bool(true)));
    }
}
