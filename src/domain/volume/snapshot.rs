use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::core::v1::ObjectReference;
use serde::{Deserialize, Serialize};

/// Volume attribute keys carried in the CSI source of a PersistentVolume.
pub const TAGS_ATTRIBUTE: &str = "tags";
pub const VOLUME_CRN_ATTRIBUTE: &str = "volumeCRN";
pub const CLUSTER_ID_ATTRIBUTE: &str = "clusterID";
pub const IOPS_ATTRIBUTE: &str = "iops";

/// Observed PersistentVolume phase.
///
/// Phases we do not recognise are kept verbatim in `Other` and behave as
/// "not Bound, not Released".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VolumePhase {
    Pending,
    Bound,
    Released,
    Failed,
    #[default]
    Unknown,
    Other(String),
}

impl VolumePhase {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Pending") => Self::Pending,
            Some("Bound") => Self::Bound,
            Some("Released") => Self::Released,
            Some("Failed") => Self::Failed,
            None | Some("") | Some("Unknown") => Self::Unknown,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Self::Bound)
    }

    pub fn is_released(&self) -> bool {
        matches!(self, Self::Released)
    }
}

impl fmt::Display for VolumePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("Pending"),
            Self::Bound => f.write_str("Bound"),
            Self::Released => f.write_str("Released"),
            Self::Failed => f.write_str("Failed"),
            Self::Unknown => f.write_str("Unknown"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ClaimRef {
    pub namespace: String,
    pub name: String,
}

/// Immutable point-in-time view of a managed PersistentVolume.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    pub name: String,
    pub uid: Option<String>,
    pub resource_version: Option<String>,
    pub phase: VolumePhase,
    /// Declared `spec.capacity["storage"]` in bytes.
    pub capacity_bytes: Option<i64>,
    /// CSI volume attributes.
    pub attributes: BTreeMap<String, String>,
    pub reclaim_policy: String,
    pub storage_class: String,
    pub claim_ref: Option<ClaimRef>,
    /// CSI driver name. `None` when the volume has no CSI source.
    pub driver: Option<String>,
    pub volume_handle: String,
}

impl ResourceSnapshot {
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    pub fn iops(&self) -> Option<&str> {
        self.attribute(IOPS_ATTRIBUTE)
    }

    /// Reference used to attach Kubernetes events to this volume.
    pub fn object_ref(&self) -> ObjectReference {
        ObjectReference {
            api_version: Some("v1".to_string()),
            kind: Some("PersistentVolume".to_string()),
            name: Some(self.name.clone()),
            uid: self.uid.clone(),
            resource_version: self.resource_version.clone(),
            ..Default::default()
        }
    }
}
