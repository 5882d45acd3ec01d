use std::sync::Arc;

use kube::Client;
use tracing::info;

use crate::app_state::{build_app_state, AppState};
use crate::core::client::events::{EventRecorder, KubeEventRecorder};
use crate::core::client::watchers::watch_persistent_volumes;
use crate::core::provider::session::SessionFactory;
use crate::scheduler::supervisor::Supervisor;

/// Watches PersistentVolumes of one CSI provisioner and keeps the provider's
/// volume metadata and tags in step with them.
pub struct PvWatcher {
    client: Client,
    supervisor: Supervisor,
}

impl PvWatcher {
    /// Events are recorded through the Kubernetes API as `pod_name`.
    pub fn new(
        client: Client,
        provisioner_name: &str,
        volume_type: &str,
        sessions: Arc<dyn SessionFactory>,
        pod_name: Option<String>,
    ) -> Self {
        let events = Arc::new(KubeEventRecorder::new(client.clone(), pod_name));
        Self::with_recorder(client, provisioner_name, volume_type, sessions, events)
    }

    pub fn with_recorder(
        client: Client,
        provisioner_name: &str,
        volume_type: &str,
        sessions: Arc<dyn SessionFactory>,
        events: Arc<dyn EventRecorder>,
    ) -> Self {
        let state = build_app_state(provisioner_name, volume_type, sessions, events);
        Self {
            client,
            supervisor: Supervisor::new(state, None),
        }
    }

    /// Bounds how many reconcile tasks run at once.
    pub fn with_max_concurrent_tasks(self, max_concurrent_tasks: Option<usize>) -> Self {
        let state: AppState = self.supervisor.state().clone();
        Self {
            client: self.client,
            supervisor: Supervisor::new(state, max_concurrent_tasks),
        }
    }

    /// Blocks for the lifetime of the watch.
    pub async fn start(&self) {
        info!("PVWatcher starting");
        let summary = self
            .supervisor
            .run(watch_persistent_volumes(self.client.clone()))
            .await;
        info!(?summary, "PVWatcher stopped");
    }
}
