//! Custom Resource Definitions for the etcd operator
//!
//! This module contains the Etcd resource, its list form, and the value types
//! they embed.

mod backup;
mod etcd;

pub use backup::Backup;
pub use etcd::{Etcd, EtcdList, EtcdPhase, EtcdSpec, EtcdStatus};

/// API group of the Etcd resource
pub const GROUP: &str = "etcd.example.com";

/// API version within [`GROUP`]
pub const VERSION: &str = "v1";

/// Full `apiVersion` string (`group/version`)
pub const API_VERSION: &str = "etcd.example.com/v1";

/// Kind of a single Etcd resource
pub const KIND: &str = "Etcd";

/// Kind of an Etcd list
pub const LIST_KIND: &str = "EtcdList";

/// Plural resource name used in API paths
pub const PLURAL: &str = "etcds";
