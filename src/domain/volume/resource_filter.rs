use tracing::debug;

use crate::domain::volume::snapshot::ResourceSnapshot;

/// Admits only volumes provisioned by `provisioner_name`.
#[derive(Debug, Clone)]
pub struct ResourceFilter {
    provisioner_name: String,
}

impl ResourceFilter {
    pub fn new(provisioner_name: impl Into<String>) -> Self {
        Self {
            provisioner_name: provisioner_name.into(),
        }
    }

    pub fn matches(&self, snapshot: Option<&ResourceSnapshot>) -> bool {
        let provisioner_match = snapshot
            .and_then(|s| s.driver.as_deref())
            .is_some_and(|driver| driver == self.provisioner_name);
        debug!(provisioner_match, "Exit filter()");
        provisioner_match
    }
}
