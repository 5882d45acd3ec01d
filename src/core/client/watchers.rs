use std::collections::HashMap;

use futures::{future, Stream, StreamExt};
use kube::runtime::{watcher, WatchStreamExt};
use kube::{Api, Client, ResourceExt};
use tracing::{debug, error, info};

use crate::core::client::kube_resources::PersistentVolume;
use crate::core::client::mappers::map_pv_to_snapshot;
use crate::domain::volume::snapshot::ResourceSnapshot;

/// One observed mutation of a PersistentVolume.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeEvent {
    /// Last snapshot seen for the same volume, `None` on first sight.
    pub old: Option<ResourceSnapshot>,
    pub new: ResourceSnapshot,
}

/// Remembers the last snapshot per volume so raw watch events can be turned
/// into before/after pairs.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    last_seen: HashMap<String, ResourceSnapshot>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.last_seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_seen.is_empty()
    }

    /// Initial list entries only prime the cache unless we already knew the
    /// volume (a relist after reconnect). Deletes are dropped silently.
    pub fn observe(&mut self, event: watcher::Event<PersistentVolume>) -> Option<VolumeEvent> {
        match event {
            watcher::Event::Apply(pv) => {
                let new = map_pv_to_snapshot(&pv);
                let old = self.last_seen.insert(pv.name_any(), new.clone());
                Some(VolumeEvent { old, new })
            }
            watcher::Event::InitApply(pv) => {
                let new = map_pv_to_snapshot(&pv);
                self.last_seen
                    .insert(pv.name_any(), new.clone())
                    .map(|old| VolumeEvent { old: Some(old), new })
            }
            watcher::Event::Delete(pv) => {
                self.last_seen.remove(&pv.name_any());
                debug!("PersistentVolume deleted: {}", pv.name_any());
                None
            }
            watcher::Event::Init => {
                debug!("PersistentVolume relist started");
                None
            }
            watcher::Event::InitDone => {
                info!("PersistentVolume cache primed with {} volume(s)", self.len());
                None
            }
        }
    }
}

/// Watch all PersistentVolumes and stream before/after pairs.
/// Watch errors are logged and the watcher reconnects with backoff.
pub fn watch_persistent_volumes(client: Client) -> impl Stream<Item = VolumeEvent> + Send {
    let api: Api<PersistentVolume> = Api::all(client);
    let watcher_config = watcher::Config::default();
    let mut cache = SnapshotCache::new();

    info!("Starting PersistentVolume watcher...");

    watcher(api, watcher_config)
        .default_backoff()
        .filter_map(move |result| {
            let event = match result {
                Ok(event) => cache.observe(event),
                Err(e) => {
                    error!("PersistentVolume watcher error: {:?}", e);
                    None
                }
            };
            future::ready(event)
        })
}
