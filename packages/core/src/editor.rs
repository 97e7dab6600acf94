//! Editor sessions: batched, scoped writes against a store.

use std::collections::BTreeSet;

use crate::error::Error;
use crate::traits::PrefsWriter;
use crate::value::Value;

/// One pending write operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    /// Store `value` under `key`.
    Put {
        /// Destination key.
        key: String,
        /// Value to store.
        value: Value,
    },
    /// Remove any entry under `key`.
    Remove {
        /// Key to remove.
        key: String,
    },
    /// Remove every entry.
    Clear,
}

/// An ordered batch of pending operations.
///
/// Batches are built through an [`Editor`] and handed to the store whole
/// on finalization; stores replay the operations in order under their
/// own locking. A batch that is never finalized is simply dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Batch {
    ops: Vec<Op>,
}

impl Batch {
    /// Create an empty batch.
    pub fn new() -> Self {
        Batch::default()
    }

    /// Whether any operations are queued.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of queued operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Queue an operation.
    pub fn push(&mut self, op: Op) {
        self.ops.push(op);
    }

    /// Iterate the queued operations in order.
    pub fn iter(&self) -> impl Iterator<Item = &Op> {
        self.ops.iter()
    }
}

impl IntoIterator for Batch {
    type Item = Op;
    type IntoIter = std::vec::IntoIter<Op>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// A scoped editor session against a store.
///
/// Queue typed puts, then finalize exactly once - with
/// [`apply`](Editor::apply) (fire-and-forget) or
/// [`commit`](Editor::commit) (synchronous, failures surfaced). Dropping
/// an editor without finalizing discards the queued writes; nothing
/// partial ever reaches the store.
///
/// # Example
///
/// ```rust,ignore
/// let mut editor = store.edit();
/// editor
///     .put_string("theme", "dark")
///     .put_bool("auto_save", true);
/// editor.apply();
/// ```
pub struct Editor<'a> {
    store: &'a dyn PrefsWriter,
    batch: Batch,
}

impl<'a> Editor<'a> {
    /// Open a session against `store`.
    pub fn new(store: &'a dyn PrefsWriter) -> Self {
        Editor {
            store,
            batch: Batch::new(),
        }
    }

    /// Queue a put of an already-built [`Value`].
    pub fn put_value(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.batch.push(Op::Put {
            key: key.into(),
            value,
        });
        self
    }

    /// Queue a string put.
    pub fn put_string(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.put_value(key, Value::String(value.into()))
    }

    /// Queue an int put.
    pub fn put_int(&mut self, key: impl Into<String>, value: i32) -> &mut Self {
        self.put_value(key, Value::Int(value))
    }

    /// Queue a long put.
    pub fn put_long(&mut self, key: impl Into<String>, value: i64) -> &mut Self {
        self.put_value(key, Value::Long(value))
    }

    /// Queue a float put.
    pub fn put_float(&mut self, key: impl Into<String>, value: f32) -> &mut Self {
        self.put_value(key, Value::Float(value))
    }

    /// Queue a bool put.
    pub fn put_bool(&mut self, key: impl Into<String>, value: bool) -> &mut Self {
        self.put_value(key, Value::Bool(value))
    }

    /// Queue a string-set put.
    pub fn put_string_set(
        &mut self,
        key: impl Into<String>,
        value: BTreeSet<String>,
    ) -> &mut Self {
        self.put_value(key, Value::StringSet(value))
    }

    /// Queue a removal.
    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.batch.push(Op::Remove { key: key.into() });
        self
    }

    /// Queue removal of every entry.
    pub fn clear(&mut self) -> &mut Self {
        self.batch.push(Op::Clear);
        self
    }

    /// The operations queued so far.
    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Finalize asynchronously (fire-and-forget).
    ///
    /// Completion and failure are not observable here; the store logs
    /// write failures instead of surfacing them.
    pub fn apply(self) {
        self.store.apply(self.batch);
    }

    /// Finalize synchronously, surfacing failures.
    pub fn commit(self) -> Result<(), Error> {
        self.store.commit(self.batch)
    }
}
