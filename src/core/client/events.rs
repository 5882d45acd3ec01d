use async_trait::async_trait;
use kube::runtime::events::{Event, EventType, Recorder, Reporter};
use kube::Client;
use tracing::warn;

use crate::core::client::kube_resources::ObjectReference;

pub const REPORTER_NAME: &str = "pv-tag-watcher";

pub mod reasons {
    pub const VOLUME_METADATA_SAVED: &str = "VolumeMetaDataSaved";
}

pub mod actions {
    pub const UPDATE_VOLUME: &str = "UpdateVolume";
}

pub const SUCCESS_NOTE: &str = "Success";

/// Sink for user-visible notifications attached to a resource.
/// Delivery is best effort: failures are logged, never returned.
#[async_trait]
pub trait EventRecorder: Send + Sync {
    async fn publish(
        &self,
        resource: &ObjectReference,
        type_: EventType,
        reason: &str,
        note: &str,
    );
}

/// Records events through the Kubernetes events API.
pub struct KubeEventRecorder {
    recorder: Recorder,
}

impl KubeEventRecorder {
    pub fn new(client: Client, instance: Option<String>) -> Self {
        let reporter = Reporter {
            controller: REPORTER_NAME.to_string(),
            instance,
        };
        Self {
            recorder: Recorder::new(client, reporter),
        }
    }
}

#[async_trait]
impl EventRecorder for KubeEventRecorder {
    async fn publish(
        &self,
        resource: &ObjectReference,
        type_: EventType,
        reason: &str,
        note: &str,
    ) {
        let event = Event {
            type_,
            reason: reason.to_string(),
            note: Some(note.to_string()),
            action: actions::UPDATE_VOLUME.to_string(),
            secondary: None,
        };

        if let Err(e) = self.recorder.publish(&event, resource).await {
            warn!(
                "Failed to record event {} for {}: {:?}",
                reason,
                resource.name.as_deref().unwrap_or("unknown"),
                e
            );
        }
    }
}
