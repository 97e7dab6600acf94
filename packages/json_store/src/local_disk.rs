//! Disk-backed preference store: one JSON file of tagged entries.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use serde_json::{Map as JsonMap, Value as JsonValue};

use prefstore_core::{Batch, Error, Op, PrefsReader, PrefsWriter, Value};

use crate::value_utils;

/// A preference store persisted as a single JSON file.
///
/// The whole map lives in memory; reads never touch the disk after
/// [`open`](LocalDiskPrefs::open). `commit` rewrites the file before
/// returning and surfaces failures. `apply` updates the in-memory map
/// immediately - subsequent reads see the write - and rewrites the file
/// on a background thread, logging failures.
///
/// File writes are monotonic: every in-memory change bumps a generation,
/// and a write only reaches the disk while holding the persist lock and
/// only when its generation is newer than what the file already holds.
/// A pending background write can therefore never overwrite a later
/// `commit` with stale state.
#[derive(Debug)]
pub struct LocalDiskPrefs {
    inner: Arc<Inner>,
}

/// Entry map plus the generation of its latest change.
#[derive(Debug)]
struct State {
    entries: BTreeMap<String, Value>,
    generation: u64,
}

#[derive(Debug)]
struct Inner {
    path: PathBuf,
    state: Mutex<State>,
    /// Generation last written to disk. Taking this lock serializes
    /// file writes, so the shared temp path is never contended.
    persisted: Mutex<u64>,
}

impl Inner {
    fn lock_state(&self) -> MutexGuard<'_, State> {
        // A poisoned map is still structurally sound; keep serving it.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the newest state to disk, unless a newer write already got
    /// there first.
    fn persist_latest(&self) -> Result<(), Error> {
        let mut persisted = self.persisted.lock().unwrap_or_else(PoisonError::into_inner);
        let (snapshot, generation) = {
            let state = self.lock_state();
            (state.entries.clone(), state.generation)
        };
        if generation <= *persisted {
            return Ok(());
        }
        let text = render(&snapshot)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        *persisted = generation;
        log::debug!("wrote preference store {}", self.path.display());
        Ok(())
    }
}

fn parse(text: &str) -> Result<BTreeMap<String, Value>, Error> {
    let json: JsonValue = serde_json::from_str(text).map_err(Error::store)?;
    let Some(obj) = json.as_object() else {
        return Err(Error::store("preference file root is not an object"));
    };
    obj.iter()
        .map(|(key, entry)| value_utils::from_tagged(key, entry).map(|v| (key.clone(), v)))
        .collect()
}

fn render(entries: &BTreeMap<String, Value>) -> Result<String, Error> {
    let mut obj = JsonMap::new();
    for (key, value) in entries {
        obj.insert(key.clone(), value_utils::to_tagged(value));
    }
    serde_json::to_string_pretty(&JsonValue::Object(obj)).map_err(Error::store)
}

fn replay(entries: &mut BTreeMap<String, Value>, batch: Batch) {
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

impl LocalDiskPrefs {
    /// Open the store file at `path`, creating an empty store when the
    /// file does not exist yet.
    ///
    /// # Errors
    ///
    /// Store-level errors for unreadable or malformed files;
    /// [`Error::UnsupportedType`] when an entry carries an unknown tag.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, Error> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) => parse(&text)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!(
            "opened preference store {} ({} entries)",
            path.display(),
            entries.len()
        );
        Ok(LocalDiskPrefs {
            inner: Arc::new(Inner {
                path,
                state: Mutex::new(State {
                    entries,
                    generation: 0,
                }),
                persisted: Mutex::new(0),
            }),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.inner.path
    }
}

impl PrefsReader for LocalDiskPrefs {
    fn read(&self, key: &str) -> Result<Option<Value>, Error> {
        Ok(self.inner.lock_state().entries.get(key).cloned())
    }

    fn snapshot(&self) -> Result<BTreeMap<String, Value>, Error> {
        Ok(self.inner.lock_state().entries.clone())
    }
}

impl PrefsWriter for LocalDiskPrefs {
    fn apply(&self, batch: Batch) {
        {
            let mut state = self.inner.lock_state();
            replay(&mut state.entries, batch);
            state.generation += 1;
        }
        // Readers already see the new map; durability is eventual. The
        // background writer re-snapshots under the persist lock, so it
        // picks up whatever is newest when it runs.
        let inner = Arc::clone(&self.inner);
        thread::spawn(move || {
            if let Err(e) = inner.persist_latest() {
                log::warn!(
                    "async preference write to {} failed: {}",
                    inner.path.display(),
                    e
                );
            }
        });
    }

    fn commit(&self, batch: Batch) -> Result<(), Error> {
        {
            let mut state = self.inner.lock_state();
            replay(&mut state.entries, batch);
            state.generation += 1;
        }
        self.inner.persist_latest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefstore_core::Preferences;
    use std::collections::BTreeSet;
    use std::time::{Duration, Instant};

    fn store_path(dir: &tempfile::TempDir) -> PathBuf {
        dir.path().join("prefs.json")
    }

    /// Reopen the file until `key` holds `expected` or the deadline
    /// passes. Lets tests observe background writes without joining the
    /// detached thread.
    fn wait_for_on_disk(path: &Path, key: &str, expected: &Value) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if path.exists() {
                let reopened = LocalDiskPrefs::open(path).unwrap();
                if reopened.read(key).unwrap().as_ref() == Some(expected) {
                    return;
                }
            }
            assert!(
                Instant::now() < deadline,
                "background write never landed for key {key:?}"
            );
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn commit_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        {
            let store = LocalDiskPrefs::open(&path).unwrap();
            store
                .edit_with(true, |editor| {
                    editor.put_string("name", "Alice");
                    editor.put_long("id", 890898980890890808);
                    editor.put_float("ratio", 0.25);
                    Ok(())
                })
                .unwrap();
        }

        let reopened = LocalDiskPrefs::open(&path).unwrap();
        assert_eq!(
            reopened.read("name").unwrap(),
            Some(Value::String("Alice".to_string()))
        );
        assert_eq!(
            reopened.read("id").unwrap(),
            Some(Value::Long(890898980890890808))
        );
        assert_eq!(reopened.read("ratio").unwrap(), Some(Value::Float(0.25)));
    }

    #[test]
    fn string_sets_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        let set: BTreeSet<String> = ["3".to_string(), "4".to_string()].into_iter().collect();

        {
            let store = LocalDiskPrefs::open(&path).unwrap();
            store
                .edit_with(true, |editor| {
                    editor.put_string_set("stringSet", set.clone());
                    Ok(())
                })
                .unwrap();
        }

        let reopened = LocalDiskPrefs::open(&path).unwrap();
        assert_eq!(
            reopened.read("stringSet").unwrap(),
            Some(Value::StringSet(set))
        );
    }

    #[test]
    fn apply_is_visible_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDiskPrefs::open(store_path(&dir)).unwrap();

        store
            .edit_with(false, |editor| {
                editor.put_int("n", 7);
                Ok(())
            })
            .unwrap();

        // No waiting on the background write: the map already has it.
        assert_eq!(store.read("n").unwrap(), Some(Value::Int(7)));
    }

    #[test]
    fn apply_is_eventually_durable() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        let store = LocalDiskPrefs::open(&path).unwrap();

        store
            .edit_with(false, |editor| {
                editor.put_int("n", 7);
                Ok(())
            })
            .unwrap();

        wait_for_on_disk(&path, "n", &Value::Int(7));
    }

    #[test]
    fn commit_is_never_clobbered_by_an_earlier_apply() {
        let dir = tempfile::tempdir().unwrap();

        // Fresh file per round so a straggling background thread from
        // one round cannot touch the next round's file.
        for round in 0..100 {
            let path = dir.path().join(format!("prefs{round}.json"));
            let store = LocalDiskPrefs::open(&path).unwrap();

            store
                .edit_with(false, |editor| {
                    editor.put_int("a", round);
                    Ok(())
                })
                .unwrap();
            store
                .edit_with(true, |editor| {
                    editor.put_int("b", round);
                    Ok(())
                })
                .unwrap();

            // Once commit returns, every later file write carries at
            // least this state; a reopen can never miss the commit.
            let reopened = LocalDiskPrefs::open(&path).unwrap();
            assert_eq!(reopened.read("b").unwrap(), Some(Value::Int(round)));
            wait_for_on_disk(&path, "a", &Value::Int(round));
        }
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalDiskPrefs::open(store_path(&dir)).unwrap();
        assert!(store.snapshot().unwrap().is_empty());
    }

    #[test]
    fn malformed_file_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        fs::write(&path, "not json at all").unwrap();

        assert!(matches!(
            LocalDiskPrefs::open(&path).unwrap_err(),
            Error::Store(_)
        ));

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(matches!(
            LocalDiskPrefs::open(&path).unwrap_err(),
            Error::Store(_)
        ));
    }

    #[test]
    fn unknown_tag_is_unsupported_on_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);
        fs::write(&path, r#"{ "k": { "uuid": "abc" } }"#).unwrap();

        assert!(matches!(
            LocalDiskPrefs::open(&path).unwrap_err(),
            Error::UnsupportedType { .. }
        ));
    }

    #[test]
    fn remove_and_clear_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = store_path(&dir);

        {
            let store = LocalDiskPrefs::open(&path).unwrap();
            store
                .edit_with(true, |editor| {
                    editor.put_int("a", 1).put_int("b", 2);
                    Ok(())
                })
                .unwrap();
            store
                .edit_with(true, |editor| {
                    editor.remove("a");
                    Ok(())
                })
                .unwrap();
        }

        let reopened = LocalDiskPrefs::open(&path).unwrap();
        assert_eq!(reopened.read("a").unwrap(), None);
        assert_eq!(reopened.read("b").unwrap(), Some(Value::Int(2)));
    }
}
