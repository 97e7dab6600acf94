//! Lazily-bound, context-scoped preference stores.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use once_cell::sync::OnceCell;

use prefstore_core::Error;

use crate::local_disk::LocalDiskPrefs;

/// Name of a context's default store.
const DEFAULT_STORE: &str = "preferences";

/// A directory scope hosting named preference stores.
///
/// The analogue of a host context: each named store maps to one
/// `<name>.json` file inside the directory.
#[derive(Clone, Debug)]
pub struct PrefsContext {
    dir: PathBuf,
}

impl PrefsContext {
    /// Scope a context to `dir`. The directory is expected to exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PrefsContext { dir: dir.into() }
    }

    /// Bind a named store - or the context's default one - without
    /// opening it.
    pub fn bind(&self, name: Option<&str>) -> PrefsBinding {
        let file = format!("{}.json", name.unwrap_or(DEFAULT_STORE));
        PrefsBinding {
            path: self.dir.join(file),
            cell: OnceCell::new(),
        }
    }
}

/// A lazily-initialized handle to one store.
///
/// The store opens on first access; the handle is then cached for the
/// life of the binding - no eviction, no refresh. Once initialized the
/// cached handle is safe to read from any thread.
pub struct PrefsBinding {
    path: PathBuf,
    cell: OnceCell<Arc<LocalDiskPrefs>>,
}

impl PrefsBinding {
    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The bound store, opened on first call.
    pub fn get(&self) -> Result<Arc<LocalDiskPrefs>, Error> {
        self.cell
            .get_or_try_init(|| LocalDiskPrefs::open(&self.path).map(Arc::new))
            .map(Arc::clone)
    }
}
