use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const STATUS_ATTRIBUTE: &str = "status";
pub const STATUS_CREATED: &str = "created";
pub const STATUS_DELETED: &str = "deleted";

/// Provider-facing view of a volume, rebuilt for every reconcile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VolumeDescriptor {
    pub volume_id: String,
    pub provider: String,
    pub volume_type: String,
    /// Owning resource CRN taken from the `volumeCRN` attribute.
    pub crn: String,
    pub tags: Vec<String>,
    /// Whole GiB, truncated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iops: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

impl VolumeDescriptor {
    pub fn status(&self) -> Option<&str> {
        self.attributes.get(STATUS_ATTRIBUTE).map(String::as_str)
    }

    pub fn is_tombstone(&self) -> bool {
        self.status() == Some(STATUS_DELETED)
    }
}
