//! Type-erased resource capability
//!
//! Generic infrastructure (caches, watch dispatchers, reconcile queues) holds
//! resources as `Box<dyn Object>` and copies them through
//! [`Object::deep_copy_object`] without knowing the concrete type.
//!
//! Absence is modelled with `Option`: copying `None` yields `None`, and there
//! is no way to build a handle that wraps nothing.

use std::any::Any;
use std::fmt;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::core::TypeMeta;

/// Compile-time `apiVersion` and `kind` of a concrete resource type.
///
/// Construction paths (serde defaults, `Default`, `new`) read these so every
/// value of the type starts out with the same type metadata.
pub trait HasTypeMeta {
    /// Full API version (e.g., "etcd.example.com/v1")
    const API_VERSION: &'static str;
    /// Resource kind (e.g., "Etcd")
    const KIND: &'static str;
}

/// A resource that can be copied and inspected behind a trait object.
pub trait Object: Any + Send + Sync + fmt::Debug {
    /// `apiVersion` and `kind` carried by this value
    fn type_meta(&self) -> TypeMeta;

    /// Object metadata, or `None` for list types
    fn object_meta(&self) -> Option<&ObjectMeta>;

    /// Deep copy into a new boxed object sharing no storage with `self`
    fn deep_copy_object(&self) -> Box<dyn Object>;

    /// Borrow as `Any` for downcasting
    fn as_any(&self) -> &dyn Any;

    /// Convert into `Box<dyn Any>` for owned downcasting
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Object {
    /// Whether the concrete type behind this object is `T`
    pub fn is<T: Object>(&self) -> bool {
        self.as_any().is::<T>()
    }

    /// Borrow the concrete value if it is a `T`
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Take the concrete value if it is a `T`
    pub fn downcast<T: Object>(self: Box<Self>) -> Option<Box<T>> {
        self.into_any().downcast::<T>().ok()
    }
}

impl Clone for Box<dyn Object> {
    fn clone(&self) -> Self {
        self.deep_copy_object()
    }
}

/// Deep copy an optional value: `None` in, `None` out.
pub fn deep_copy<T: Clone>(src: Option<&T>) -> Option<T> {
    src.cloned()
}

/// Deep copy an optional value into a type-erased handle.
///
/// `None` in yields `None` out, never a boxed handle around nothing.
pub fn deep_copy_object<T: Object + ?Sized>(src: Option<&T>) -> Option<Box<dyn Object>> {
    src.map(|obj| obj.deep_copy_object())
}
