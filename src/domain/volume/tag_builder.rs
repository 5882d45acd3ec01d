use tracing::debug;

use crate::domain::volume::snapshot::{
    ResourceSnapshot, CLUSTER_ID_ATTRIBUTE, TAGS_ATTRIBUTE, VOLUME_CRN_ATTRIBUTE,
};

pub const RECLAIM_POLICY_TAG: &str = "reclaimpolicy:";
pub const STORAGE_CLASS_TAG: &str = "storageclass:";
pub const NAMESPACE_TAG: &str = "namespace:";
pub const PVC_NAME_TAG: &str = "pvc:";
pub const PV_NAME_TAG: &str = "pv:";
pub const PROVISIONER_TAG: &str = "provisioner:";

/// Returns the volume CRN and the full tag list for a snapshot.
///
/// User tags from the comma separated `tags` attribute come first, followed by
/// the derived tags in a fixed order. Nothing is validated or deduplicated.
pub fn build_tags(snapshot: &ResourceSnapshot, provisioner_name: &str) -> (String, Vec<String>) {
    debug!("Entry build_tags() for {}", snapshot.name);

    let user_tags = snapshot.attribute(TAGS_ATTRIBUTE).unwrap_or_default().trim();
    let mut tags: Vec<String> = if user_tags.is_empty() {
        Vec::new()
    } else {
        user_tags.split(',').map(str::to_string).collect()
    };

    let (namespace, claim_name) = snapshot
        .claim_ref
        .as_ref()
        .map(|c| (c.namespace.as_str(), c.name.as_str()))
        .unwrap_or_default();

    tags.push(format!(
        "{CLUSTER_ID_ATTRIBUTE}:{}",
        snapshot.attribute(CLUSTER_ID_ATTRIBUTE).unwrap_or_default()
    ));
    tags.push(format!("{RECLAIM_POLICY_TAG}{}", snapshot.reclaim_policy));
    tags.push(format!("{STORAGE_CLASS_TAG}{}", snapshot.storage_class));
    tags.push(format!("{NAMESPACE_TAG}{namespace}"));
    tags.push(format!("{PVC_NAME_TAG}{claim_name}"));
    tags.push(format!("{PV_NAME_TAG}{}", snapshot.name));
    tags.push(format!("{PROVISIONER_TAG}{provisioner_name}"));

    let crn = snapshot
        .attribute(VOLUME_CRN_ATTRIBUTE)
        .unwrap_or_default()
        .to_string();

    debug!(crn = %crn, ?tags, "Exit build_tags()");
    (crn, tags)
}
