use std::sync::Arc;

use crate::core::client::events::EventRecorder;
use crate::core::provider::session::SessionFactory;
use crate::domain::volume::volume_mapper::VolumeMapper;
use crate::domain::volume::volume_type_registry::VolumeTypeRegistry;

/// Read-only context shared by every reconcile task.
#[derive(Clone)]
pub struct AppState {
    pub provisioner_name: Arc<str>,
    pub registry: Arc<VolumeTypeRegistry>,
    pub sessions: Arc<dyn SessionFactory>,
    pub events: Arc<dyn EventRecorder>,
}

/// Registers `volume_type` for `provisioner_name` in a registry owned by this
/// state alone.
pub fn build_app_state(
    provisioner_name: &str,
    volume_type: &str,
    sessions: Arc<dyn SessionFactory>,
    events: Arc<dyn EventRecorder>,
) -> AppState {
    AppState {
        provisioner_name: Arc::from(provisioner_name),
        registry: Arc::new(VolumeTypeRegistry::with_entry(provisioner_name, volume_type)),
        sessions,
        events,
    }
}

impl AppState {
    pub fn mapper(&self) -> VolumeMapper<'_> {
        VolumeMapper::new(
            &self.provisioner_name,
            self.sessions.provider_type(),
            &self.registry,
        )
    }
}
