//! Etcd Custom Resource Definition
//!
//! An `Etcd` pairs the desired state of an etcd cluster (`EtcdSpec`) with the
//! state last observed by the operator (`EtcdStatus`). `EtcdList` is the list
//! shape returned by list and watch calls.

use std::any::Any;
use std::borrow::Cow;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
use k8s_openapi::NamespaceResourceScope;
use kube::core::TypeMeta;
use kube::Resource;
use serde::{Deserialize, Serialize};

use super::backup::Backup;
use super::{API_VERSION, GROUP, KIND, LIST_KIND, PLURAL, VERSION};
use crate::object::{HasTypeMeta, Object};

/// Desired state of an etcd cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdSpec {
    /// Number of etcd members
    #[serde(default)]
    pub size: i32,

    /// etcd version to run (e.g., "3.5.17")
    #[serde(default)]
    pub version: String,

    /// Backup policy
    #[serde(default)]
    pub backup: Backup,
}

/// Phase of an Etcd cluster
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum EtcdPhase {
    /// Cluster has been accepted but not acted on yet
    #[default]
    Pending,
    /// Members are being created
    Creating,
    /// All members are up
    Running,
    /// Cluster could not be brought up
    Failed,
}

impl std::fmt::Display for EtcdPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Creating => write!(f, "Creating"),
            Self::Running => write!(f, "Running"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Observed state of an etcd cluster
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdStatus {
    /// Current phase
    #[serde(default)]
    pub phase: EtcdPhase,

    /// Members currently passing health checks
    #[serde(default)]
    pub ready_members: i32,

    /// Generation of the spec this status was computed from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
}

/// An etcd cluster managed by the operator
///
/// `Clone` is the deep copy: metadata goes through `ObjectMeta`'s own clone,
/// spec and status are value types. `clone_from` fills an existing value in
/// place and leaves it sharing nothing with the source.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Etcd {
    /// API version
    #[serde(default = "Etcd::default_api_version")]
    pub api_version: String,

    /// Resource kind
    #[serde(default = "Etcd::default_kind")]
    pub kind: String,

    /// Standard object metadata
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Desired state
    #[serde(default)]
    pub spec: EtcdSpec,

    /// Observed state
    #[serde(default)]
    pub status: EtcdStatus,
}

impl HasTypeMeta for Etcd {
    const API_VERSION: &'static str = API_VERSION;
    const KIND: &'static str = KIND;
}

impl Default for Etcd {
    fn default() -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata: ObjectMeta::default(),
            spec: EtcdSpec::default(),
            status: EtcdStatus::default(),
        }
    }
}

impl Etcd {
    fn default_api_version() -> String {
        <Self as HasTypeMeta>::API_VERSION.to_string()
    }

    fn default_kind() -> String {
        <Self as HasTypeMeta>::KIND.to_string()
    }

    /// Create a new Etcd with the given name and spec and an empty status
    pub fn new(name: impl Into<String>, spec: EtcdSpec) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata: ObjectMeta {
                name: Some(name.into()),
                ..Default::default()
            },
            spec,
            status: EtcdStatus::default(),
        }
    }
}

impl Resource for Etcd {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(KIND)
    }

    fn group(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(GROUP)
    }

    fn version(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(VERSION)
    }

    fn plural(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(PLURAL)
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

impl Object for Etcd {
    fn type_meta(&self) -> TypeMeta {
        TypeMeta {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
        }
    }

    fn object_meta(&self) -> Option<&ObjectMeta> {
        Some(&self.metadata)
    }

    fn deep_copy_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// A list of Etcd resources
///
/// `items: None` (nothing allocated) and `items: Some(vec![])` (allocated,
/// empty) are different states and both survive a clone unchanged.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdList {
    /// API version
    #[serde(default = "EtcdList::default_api_version")]
    pub api_version: String,

    /// Resource kind
    #[serde(default = "EtcdList::default_kind")]
    pub kind: String,

    /// Standard list metadata
    #[serde(default)]
    pub metadata: ListMeta,

    /// The listed resources, in order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<Etcd>>,
}

impl HasTypeMeta for EtcdList {
    const API_VERSION: &'static str = API_VERSION;
    const KIND: &'static str = LIST_KIND;
}

impl Default for EtcdList {
    /// An empty list with no item sequence allocated
    fn default() -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata: ListMeta::default(),
            items: None,
        }
    }
}

impl EtcdList {
    fn default_api_version() -> String {
        <Self as HasTypeMeta>::API_VERSION.to_string()
    }

    fn default_kind() -> String {
        <Self as HasTypeMeta>::KIND.to_string()
    }

    /// Create a list holding `items`
    ///
    /// The item sequence is always allocated, even when `items` is empty.
    pub fn new(items: Vec<Etcd>) -> Self {
        Self {
            api_version: Self::default_api_version(),
            kind: Self::default_kind(),
            metadata: ListMeta::default(),
            items: Some(items),
        }
    }

    /// Number of items; an unallocated sequence counts as empty
    pub fn len(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    /// Whether the list holds no items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Clone for EtcdList {
    fn clone(&self) -> Self {
        Self {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
            metadata: self.metadata.clone(),
            items: clone_items(self.items.as_deref()),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.api_version.clone_from(&source.api_version);
        self.kind.clone_from(&source.kind);
        self.metadata.clone_from(&source.metadata);
        self.items = clone_items(source.items.as_deref());
    }
}

/// Copy items into a fresh allocation of the same length, index for index.
fn clone_items(items: Option<&[Etcd]>) -> Option<Vec<Etcd>> {
    let items = items?;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        out.push(item.clone());
    }
    Some(out)
}

impl Object for EtcdList {
    fn type_meta(&self) -> TypeMeta {
        TypeMeta {
            api_version: self.api_version.clone(),
            kind: self.kind.clone(),
        }
    }

    fn object_meta(&self) -> Option<&ObjectMeta> {
        None
    }

    fn deep_copy_object(&self) -> Box<dyn Object> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::ResourceExt;

    fn sample_etcd(name: &str) -> Etcd {
        let mut etcd = Etcd::new(
            name,
            EtcdSpec {
                size: 3,
                version: "3.5.17".to_string(),
                backup: Backup::scheduled("0 * * * *"),
            },
        );
        etcd.metadata.namespace = Some("default".to_string());
        etcd.status.phase = EtcdPhase::Running;
        etcd
    }

    #[test]
    fn test_etcd_phase_display() {
        assert_eq!(EtcdPhase::Pending.to_string(), "Pending");
        assert_eq!(EtcdPhase::Creating.to_string(), "Creating");
        assert_eq!(EtcdPhase::Running.to_string(), "Running");
        assert_eq!(EtcdPhase::Failed.to_string(), "Failed");
    }

    #[test]
    fn test_new_sets_type_meta() {
        let etcd = Etcd::new("main", EtcdSpec::default());

        assert_eq!(etcd.api_version, "etcd.example.com/v1");
        assert_eq!(etcd.kind, "Etcd");
        assert_eq!(etcd.name_any(), "main");
        assert_eq!(etcd.status, EtcdStatus::default());
    }

    #[test]
    fn test_resource_impl_matches_constants() {
        assert_eq!(Etcd::kind(&()), KIND);
        assert_eq!(Etcd::group(&()), GROUP);
        assert_eq!(Etcd::version(&()), VERSION);
        assert_eq!(Etcd::api_version(&()), API_VERSION);
        assert_eq!(Etcd::plural(&()), PLURAL);
    }

    #[test]
    fn test_clone_from_overwrites_destination() {
        let src = sample_etcd("src");
        let mut dst = sample_etcd("dst");
        dst.spec.size = 9;
        dst.metadata.labels = Some([("stale".to_string(), "yes".to_string())].into());

        dst.clone_from(&src);

        assert_eq!(dst, src);
        assert!(dst.metadata.labels.is_none());
    }

    #[test]
    fn test_etcd_parses_with_defaults() {
        let etcd: Etcd = serde_json::from_value(serde_json::json!({
            "metadata": { "name": "main" },
            "spec": { "size": 3, "backup": { "enabled": true, "schedule": "0 * * * *" } }
        }))
        .expect("parse etcd");

        assert_eq!(etcd.api_version, API_VERSION);
        assert_eq!(etcd.kind, KIND);
        assert_eq!(etcd.spec.size, 3);
        assert!(etcd.spec.backup.enabled);
        assert_eq!(etcd.status.phase, EtcdPhase::Pending);
    }

    #[test]
    fn test_default_type_meta_matches_parsed_empty_object() {
        let parsed: Etcd = serde_json::from_value(serde_json::json!({})).expect("parse etcd");
        let defaulted = Etcd::default().type_meta();
        assert_eq!(defaulted.api_version, parsed.type_meta().api_version);
        assert_eq!(defaulted.kind, parsed.type_meta().kind);
        assert_eq!(defaulted.kind, KIND);
        assert_eq!(Etcd::default(), parsed);

        let parsed: EtcdList =
            serde_json::from_value(serde_json::json!({})).expect("parse list");
        let defaulted = EtcdList::default().type_meta();
        assert_eq!(defaulted.api_version, parsed.type_meta().api_version);
        assert_eq!(defaulted.kind, parsed.type_meta().kind);
        assert_eq!(defaulted.kind, LIST_KIND);
        assert!(parsed.items.is_none());
    }

    #[test]
    fn test_list_clone_keeps_absent_items_absent() {
        let list = EtcdList::default();
        let copy = list.clone();

        assert!(copy.items.is_none());
        assert!(copy.is_empty());
    }

    #[test]
    fn test_list_clone_keeps_empty_items_allocated() {
        let list = EtcdList::new(Vec::new());
        let copy = list.clone();

        assert_eq!(copy.items, Some(Vec::new()));
        assert_eq!(copy.kind, LIST_KIND);
    }

    #[test]
    fn test_list_clone_from_replaces_items() {
        let src = EtcdList::default();
        let mut dst = EtcdList::new(vec![sample_etcd("a"), sample_etcd("b")]);

        dst.clone_from(&src);

        assert!(dst.items.is_none());
        assert_eq!(dst, src);
    }

    #[test]
    fn test_list_clone_allocates_new_items() {
        let list = EtcdList::new(vec![sample_etcd("a"), sample_etcd("b")]);
        let copy = list.clone();

        let src_items = list.items.as_ref().expect("items");
        let copy_items = copy.items.as_ref().expect("items");
        assert_eq!(copy_items.len(), 2);
        assert_ne!(src_items.as_ptr(), copy_items.as_ptr());
        assert_eq!(copy_items[0].name_any(), "a");
        assert_eq!(copy_items[1].name_any(), "b");
    }

    #[test]
    fn test_object_type_meta() {
        let etcd = sample_etcd("main");
        let list = EtcdList::new(vec![etcd.clone()]);

        assert_eq!(etcd.type_meta().kind, "Etcd");
        assert_eq!(list.type_meta().kind, "EtcdList");
        assert_eq!(list.type_meta().api_version, API_VERSION);
        assert!(etcd.object_meta().is_some());
        assert!(list.object_meta().is_none());
    }
}
