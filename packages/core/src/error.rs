//! Error types for the preference layer.
//!
//! Every variant is a synchronous, programmer-visible contract violation
//! or a pass-through store failure. No retries, no recovery.

use crate::value::Kind;

/// Errors surfaced by the preference layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested or inferred type is outside the supported set.
    #[error("{type_name} is not supported as a preference type")]
    UnsupportedType {
        /// Name of the rejected type.
        type_name: String,
    },

    /// The value under a key, or a supplied default, has the wrong kind.
    ///
    /// Also covers string sets containing non-string elements, in which
    /// case `found` names the offending element's kind.
    #[error("type mismatch for key \"{key}\": expected {expected}, found {found}")]
    TypeMismatch {
        /// Key the access was made against.
        key: String,
        /// Kind the caller asked for.
        expected: Kind,
        /// Kind actually encountered.
        found: Kind,
    },

    /// A store-level failure (I/O, corruption), passed through unmodified.
    #[error("store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Build an [`Error::UnsupportedType`].
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Error::UnsupportedType {
            type_name: type_name.into(),
        }
    }

    /// Build an [`Error::TypeMismatch`].
    pub fn mismatch(key: impl Into<String>, expected: Kind, found: Kind) -> Self {
        Error::TypeMismatch {
            key: key.into(),
            expected,
            found,
        }
    }

    /// Wrap a store-level failure.
    pub fn store(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Error::Store(error.into())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::store(e)
    }
}
