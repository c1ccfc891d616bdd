//! Etcd operator resource layer
//!
//! Typed Etcd resources with aliasing-free deep copies, and an object store
//! that holds them behind the type-erased [`Object`] capability.
//!
//! # Modules
//!
//! - [`crd`] - Etcd, EtcdList, and the spec/status/backup value types
//! - [`object`] - The `Object` trait and nil-safe copy helpers
//! - [`store`] - Concurrent store handing out deep copies

#![deny(missing_docs)]

pub mod store;

pub use etcd_common::{crd, object, telemetry};
pub use etcd_common::{deep_copy, deep_copy_object, Error, Object, Result};
pub use store::{ObjectKey, ObjectStore};
