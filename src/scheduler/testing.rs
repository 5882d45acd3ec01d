//! Hand-written doubles for the provider and event sink.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use kube::runtime::events::EventType;

use crate::app_state::{build_app_state, AppState};
use crate::core::client::events::EventRecorder;
use crate::core::client::kube_resources::ObjectReference;
use crate::core::provider::session::{ProviderSession, SessionFactory, VolumeUpdater};
use crate::domain::volume::descriptor::VolumeDescriptor;
use crate::domain::volume::snapshot::{
    ClaimRef, ResourceSnapshot, VolumePhase, CLUSTER_ID_ATTRIBUTE, IOPS_ATTRIBUTE,
};

pub const PROVISIONER: &str = "vpc.block.csi.ibm.io";
pub const GIB: i64 = 1 << 30;

#[derive(Default)]
pub struct MockUpdater {
    pub calls: Mutex<Vec<VolumeDescriptor>>,
    pub fail: bool,
    /// Volume id whose update records the call and then never resolves.
    pub hang_on: Option<String>,
}

impl MockUpdater {
    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn volume_ids(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|v| v.volume_id.clone())
            .collect()
    }
}

#[async_trait]
impl VolumeUpdater for MockUpdater {
    async fn update_volume(&self, volume: &VolumeDescriptor) -> Result<()> {
        self.calls.lock().unwrap().push(volume.clone());
        if self.hang_on.as_deref() == Some(volume.volume_id.as_str()) {
            std::future::pending::<()>().await;
        }
        if self.fail {
            Err(anyhow!("provider unavailable"))
        } else {
            Ok(())
        }
    }
}

#[derive(Default)]
pub struct MockSession {
    pub metadata: MockUpdater,
    pub tags: MockUpdater,
}

#[async_trait]
impl VolumeUpdater for MockSession {
    async fn update_volume(&self, volume: &VolumeDescriptor) -> Result<()> {
        self.metadata.update_volume(volume).await
    }
}

impl ProviderSession for MockSession {
    fn tag_session(&self) -> &dyn VolumeUpdater {
        &self.tags
    }
}

pub enum FactoryMode {
    Session(Arc<MockSession>),
    Absent,
    Error,
    /// Panics on the first request, hands out the session afterwards.
    PanicOnFirst(Arc<MockSession>),
}

pub struct MockFactory {
    pub mode: FactoryMode,
    pub requests: AtomicUsize,
}

impl MockFactory {
    pub fn new(mode: FactoryMode) -> Self {
        Self {
            mode,
            requests: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SessionFactory for MockFactory {
    fn provider_type(&self) -> &str {
        "vpc-classic"
    }

    async fn session(&self) -> Result<Option<Arc<dyn ProviderSession>>> {
        let request = self.requests.fetch_add(1, Ordering::SeqCst);
        match &self.mode {
            FactoryMode::Session(session) => Ok(Some(session.clone() as Arc<dyn ProviderSession>)),
            FactoryMode::Absent => Ok(None),
            FactoryMode::Error => Err(anyhow!("no credentials")),
            FactoryMode::PanicOnFirst(_) if request == 0 => panic!("session factory blew up"),
            FactoryMode::PanicOnFirst(session) => {
                Ok(Some(session.clone() as Arc<dyn ProviderSession>))
            }
        }
    }
}

#[derive(Default)]
pub struct RecordingEvents {
    pub events: Mutex<Vec<(EventType, String, String)>>,
}

impl RecordingEvents {
    pub fn recorded(&self) -> Vec<(EventType, String, String)> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventRecorder for RecordingEvents {
    async fn publish(
        &self,
        _resource: &ObjectReference,
        type_: EventType,
        reason: &str,
        note: &str,
    ) {
        self.events
            .lock()
            .unwrap()
            .push((type_, reason.to_string(), note.to_string()));
    }
}

pub fn state_with(factory: Arc<MockFactory>, events: Arc<RecordingEvents>) -> AppState {
    build_app_state(PROVISIONER, "vpc-block", factory, events)
}

pub fn snapshot(name: &str, phase: VolumePhase, capacity_gib: i64) -> ResourceSnapshot {
    let mut snapshot = ResourceSnapshot {
        name: name.to_string(),
        phase,
        capacity_bytes: Some(capacity_gib * GIB),
        reclaim_policy: "Delete".to_string(),
        storage_class: "ibmc-vpc-block-10iops-tier".to_string(),
        claim_ref: Some(ClaimRef {
            namespace: "default".to_string(),
            name: format!("{name}-claim"),
        }),
        driver: Some(PROVISIONER.to_string()),
        volume_handle: format!("r006-{name}"),
        ..Default::default()
    };
    snapshot.attributes.insert(IOPS_ATTRIBUTE.into(), "3000".into());
    snapshot.attributes.insert(CLUSTER_ID_ATTRIBUTE.into(), "cluster-1".into());
    snapshot
}
