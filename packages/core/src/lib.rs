//! Core prefstore: the typed preference model.
//!
//! This layer defines what a preference is and how stores expose it:
//! - `Kind`: the closed set of supported value kinds
//! - `Value`: a value carrying exactly one of those kinds
//! - `PrefsReader` / `PrefsWriter`: the store traits
//! - `Batch` / `Editor`: scoped, batched write sessions
//!
//! Typed dispatch and conveniences live in `prefstore-typed`; concrete
//! stores live in `prefstore-json-store`.
//!
//! # Example
//!
//! ```rust,ignore
//! use prefstore_core::{Preferences, Value};
//!
//! fn rename(store: &impl Preferences) -> Result<(), prefstore_core::Error> {
//!     store.edit_with(true, |editor| {
//!         editor.put_string("display_name", "Alice");
//!         editor.remove("legacy_name");
//!         Ok(())
//!     })
//! }
//! ```

mod editor;
mod error;
mod traits;
mod value;

pub use editor::{Batch, Editor, Op};
pub use error::Error;
pub use traits::{Preferences, PrefsReader, PrefsWriter};
pub use value::{Kind, Value};
