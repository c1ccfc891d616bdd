//! In-memory object store keyed by namespace and name
//!
//! The store holds resources behind `Box<dyn Object>` and never hands out its
//! own storage: every write stores a deep copy of the caller's value and every
//! read returns a fresh deep copy. Callers can mutate what they get back
//! without locking and without affecting other readers.

use std::fmt;

use dashmap::DashMap;
use etcd_common::crd::{Etcd, EtcdList};
use etcd_common::{Error, Object, Result};
use kube::Resource;
use tracing::debug;

/// Identity of a stored object
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectKey {
    /// Namespace, `None` for cluster-scoped objects
    pub namespace: Option<String>,
    /// Object name
    pub name: String,
}

impl ObjectKey {
    /// Key for a namespaced object
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Key for a cluster-scoped object
    pub fn cluster_scoped(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Derive the key from an object's metadata
    ///
    /// Fails for objects without metadata (lists) or without a name.
    pub fn for_object(obj: &dyn Object) -> Result<Self> {
        let kind = obj.type_meta().kind;
        let meta = obj
            .object_meta()
            .ok_or_else(|| Error::missing_metadata(&kind))?;
        let name = meta
            .name
            .clone()
            .ok_or_else(|| Error::missing_metadata(kind))?;
        Ok(Self {
            namespace: meta.namespace.clone(),
            name,
        })
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Concurrent store of type-erased resources
#[derive(Debug, Default)]
pub struct ObjectStore {
    entries: DashMap<ObjectKey, Box<dyn Object>>,
}

impl ObjectStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a deep copy of `obj`, returning the entry it replaced
    pub fn insert(&self, obj: &dyn Object) -> Result<Option<Box<dyn Object>>> {
        let key = ObjectKey::for_object(obj)?;
        debug!(
            kind = %obj.type_meta().kind,
            namespace = key.namespace.as_deref().unwrap_or(""),
            name = %key.name,
            "storing object"
        );
        Ok(self.entries.insert(key, obj.deep_copy_object()))
    }

    /// Deep copy of the object stored under `key`, `None` if absent
    pub fn get(&self, key: &ObjectKey) -> Option<Box<dyn Object>> {
        self.entries
            .get(key)
            .map(|entry| entry.value().deep_copy_object())
    }

    /// Deep copy of the object under `key` as its concrete type
    ///
    /// Returns `Ok(None)` when the key is absent and an error when the stored
    /// object is some other type.
    pub fn get_typed<T>(&self, key: &ObjectKey) -> Result<Option<T>>
    where
        T: Object + Resource<DynamicType = ()> + Clone,
    {
        let Some(entry) = self.entries.get(key) else {
            return Ok(None);
        };
        match entry.value().downcast_ref::<T>() {
            Some(obj) => Ok(Some(obj.clone())),
            None => Err(Error::kind_mismatch(
                T::kind(&()),
                entry.value().type_meta().kind,
            )),
        }
    }

    /// Remove and return the object under `key`
    pub fn remove(&self, key: &ObjectKey) -> Option<Box<dyn Object>> {
        let removed = self.entries.remove(key).map(|(_, obj)| obj);
        if let Some(obj) = &removed {
            debug!(
                kind = %obj.type_meta().kind,
                namespace = key.namespace.as_deref().unwrap_or(""),
                name = %key.name,
                "removed object"
            );
        }
        removed
    }

    /// Whether an object is stored under `key`
    pub fn contains(&self, key: &ObjectKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of stored objects
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All keys, sorted by namespace then name
    pub fn keys(&self) -> Vec<ObjectKey> {
        let mut keys: Vec<ObjectKey> = self.entries.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }

    /// Snapshot of stored Etcd objects as a list, sorted by key
    ///
    /// With `namespace` set, only objects in that namespace are included. The
    /// returned list always has an allocated item sequence.
    pub fn list_etcds(&self, namespace: Option<&str>) -> EtcdList {
        let mut found: Vec<(ObjectKey, Etcd)> = self
            .entries
            .iter()
            .filter(|e| namespace.map_or(true, |ns| e.key().namespace.as_deref() == Some(ns)))
            .filter_map(|e| {
                e.value()
                    .downcast_ref::<Etcd>()
                    .map(|etcd| (e.key().clone(), etcd.clone()))
            })
            .collect();
        found.sort_by(|a, b| a.0.cmp(&b.0));
        EtcdList::new(found.into_iter().map(|(_, etcd)| etcd).collect())
    }
}
