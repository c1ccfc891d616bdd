//! Error types for etcd resource infrastructure
//!
//! Copying a resource never fails. These errors come from the layers that
//! hold copies: keying objects by name and reading them back as a concrete
//! type.

use thiserror::Error;

/// Main error type for etcd operator infrastructure
#[derive(Debug, Error)]
pub enum Error {
    /// Object cannot be keyed because it carries no name
    #[error("{kind} object has no metadata.name")]
    MissingMetadata {
        /// Kind of the offending object
        kind: String,
    },

    /// Stored object is of a different concrete type than requested
    #[error("kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind the caller asked for
        expected: String,
        /// Kind actually stored
        found: String,
    },
}

impl Error {
    /// Create a missing-metadata error for the given kind
    pub fn missing_metadata(kind: impl Into<String>) -> Self {
        Self::MissingMetadata { kind: kind.into() }
    }

    /// Create a kind-mismatch error
    pub fn kind_mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::KindMismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}
