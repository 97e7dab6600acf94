//! Typed access to preference stores.
//!
//! This layer is the dispatch table between requested kinds and the
//! store's read/write primitives:
//! - [`TypedPrefs`]: kind-dispatched `get`/`set` with default and
//!   sentinel normalization, plus dynamic JSON access
//! - [`PrefType`]: the sealed Rust-type-to-kind mapping behind the
//!   inferred access path
//! - [`Slot`]: a typed accessor bound to one fixed key
//!
//! # Example
//!
//! ```rust,ignore
//! use prefstore_typed::TypedPrefs;
//!
//! store.set_as("volume", 7i32)?;
//! let volume: Option<i32> = store.get_as("volume")?;       // Some(7)
//! let missing: Option<i32> = store.get_as("missing")?;     // Some(-1), the sentinel
//! let with_default = store.get_as_or("missing", 9i32)?;    // 9
//! ```

mod accessor;
mod convert;
mod slot;
mod types;

pub use accessor::TypedPrefs;
pub use convert::{value_from_json, value_to_json};
pub use slot::Slot;
pub use types::PrefType;
