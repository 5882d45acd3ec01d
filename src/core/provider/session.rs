use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::volume::descriptor::VolumeDescriptor;

/// Anything that can push a volume descriptor to the storage provider.
#[async_trait]
pub trait VolumeUpdater: Send + Sync {
    async fn update_volume(&self, volume: &VolumeDescriptor) -> Result<()>;
}

/// A provider session. `update_volume` saves volume metadata; the tag
/// session pushes tags to the underlying IaaS.
pub trait ProviderSession: VolumeUpdater {
    fn tag_session(&self) -> &dyn VolumeUpdater;
}

/// Hands out provider sessions, one per reconcile task.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    /// Provider kind stamped on every descriptor.
    fn provider_type(&self) -> &str;

    /// `Ok(None)` means no session is available right now.
    async fn session(&self) -> Result<Option<Arc<dyn ProviderSession>>>;
}
