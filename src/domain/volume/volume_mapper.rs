use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::volume::descriptor::{
    VolumeDescriptor, STATUS_ATTRIBUTE, STATUS_CREATED, STATUS_DELETED,
};
use crate::domain::volume::snapshot::{ResourceSnapshot, CLUSTER_ID_ATTRIBUTE};
use crate::domain::volume::tag_builder::build_tags;
use crate::domain::volume::volume_type_registry::VolumeTypeRegistry;

pub const GIB: i64 = 1024 * 1024 * 1024;

/// Bytes → whole GiB, rounding toward zero.
pub fn bytes_to_gib(bytes: i64) -> i64 {
    bytes / GIB
}

/// Translates snapshots into provider descriptors for one provisioner.
#[derive(Debug, Clone)]
pub struct VolumeMapper<'a> {
    pub provisioner_name: &'a str,
    pub provider_type: &'a str,
    pub registry: &'a VolumeTypeRegistry,
}

impl<'a> VolumeMapper<'a> {
    pub fn new(
        provisioner_name: &'a str,
        provider_type: &'a str,
        registry: &'a VolumeTypeRegistry,
    ) -> Self {
        Self {
            provisioner_name,
            provider_type,
            registry,
        }
    }

    /// A released volume maps to a tombstone: status `deleted`, no tags,
    /// capacity or iops. Anything else carries the full metadata.
    pub fn to_descriptor(&self, snapshot: &ResourceSnapshot) -> VolumeDescriptor {
        debug!("Entry to_descriptor() for {}", snapshot.name);

        let (crn, tags) = build_tags(snapshot, self.provisioner_name);
        let cluster_id = snapshot
            .attribute(CLUSTER_ID_ATTRIBUTE)
            .unwrap_or_default()
            .to_string();

        let mut attributes = BTreeMap::new();
        attributes.insert(CLUSTER_ID_ATTRIBUTE.to_lowercase(), cluster_id);

        let mut volume = VolumeDescriptor {
            volume_id: snapshot.volume_handle.clone(),
            provider: self.provider_type.to_string(),
            volume_type: self
                .registry
                .volume_type_for(snapshot.driver.as_deref())
                .to_string(),
            crn,
            ..Default::default()
        };

        if snapshot.phase.is_released() {
            attributes.insert(STATUS_ATTRIBUTE.to_string(), STATUS_DELETED.to_string());
        } else {
            volume.tags = tags;
            volume.capacity = Some(bytes_to_gib(snapshot.capacity_bytes.unwrap_or_default()));
            volume.iops = Some(snapshot.iops().unwrap_or_default().to_string());
            attributes.insert(STATUS_ATTRIBUTE.to_string(), STATUS_CREATED.to_string());
        }
        volume.attributes = attributes;

        debug!(?volume, "Exit to_descriptor()");
        volume
    }
}
