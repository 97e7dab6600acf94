//! JSON-backed preference stores.
//!
//! - [`InMemoryPrefs`]: a map in memory, for tests and ephemeral use
//! - [`LocalDiskPrefs`]: a single JSON file of tagged entries
//! - [`PrefsContext`] / [`PrefsBinding`]: lazily-opened named stores
//!   scoped to a host directory

mod binding;
mod in_memory;
mod local_disk;
mod value_utils;

pub use binding::{PrefsBinding, PrefsContext};
pub use in_memory::InMemoryPrefs;
pub use local_disk::LocalDiskPrefs;
