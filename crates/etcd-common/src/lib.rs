//! Common types for the etcd operator: CRDs, the object capability, errors,
//! and telemetry

#![deny(missing_docs)]

pub mod crd;
pub mod error;
pub mod object;
pub mod telemetry;

pub use error::Error;
pub use object::{deep_copy, deep_copy_object, HasTypeMeta, Object};

/// Result type alias using our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
