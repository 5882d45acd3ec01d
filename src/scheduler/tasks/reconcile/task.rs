use kube::runtime::events::EventType;
use tracing::{debug, info, warn};

use crate::app_state::AppState;
use crate::core::client::events::{reasons, SUCCESS_NOTE};
use crate::core::client::watchers::VolumeEvent;
use crate::domain::volume::change_detector::{is_first_bind, is_material};
use crate::errors::WatcherError;

/// What a single reconcile did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Phase, capacity and iops unchanged.
    Skipped,
    /// The provider handed out no session.
    NoSession,
    Updated {
        metadata_saved: bool,
        /// `None` when the event was not a first bind.
        tags_synced: Option<bool>,
    },
}

/// Reconciles one before/after pair against the provider.
///
/// Both phases are best effort: a failed metadata update is reported and the
/// tag sync still runs. Only a failure to obtain a session is returned as an
/// error; the caller decides how to log it.
pub async fn run(state: &AppState, event: &VolumeEvent) -> Result<TaskOutcome, WatcherError> {
    let VolumeEvent { old, new } = event;
    debug!(old = ?old.as_ref().map(|o| &o.phase), new = %new.phase, "Entry reconcile()");

    if !is_material(old.as_ref(), new) {
        info!("Skipping update volume as there is no change in status, capacity and iops");
        return Ok(TaskOutcome::Skipped);
    }

    let session = state
        .sessions
        .session()
        .await
        .map_err(|e| WatcherError::Session(e.to_string()))?;
    let Some(session) = session else {
        debug!("No provider session available, nothing to update");
        return Ok(TaskOutcome::NoSession);
    };

    let volume = state.mapper().to_descriptor(new);
    let resource = new.object_ref();

    info!(?volume, "Updating metadata for the volume");
    let metadata_saved = match session.update_volume(&volume).await {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to update volume metadata: {:?}", e);
            state
                .events
                .publish(&resource, EventType::Warning, reasons::VOLUME_METADATA_SAVED, &e.to_string())
                .await;
            false
        }
    };

    // Tags are pushed to the IaaS only when the volume binds for the first time
    let tags_synced = if is_first_bind(old.as_ref(), new) {
        info!("Updating tags from VPC IaaS");
        match session.tag_session().update_volume(&volume).await {
            Ok(()) => {
                state
                    .events
                    .publish(&resource, EventType::Normal, reasons::VOLUME_METADATA_SAVED, SUCCESS_NOTE)
                    .await;
                info!("Volume metadata saved successfully");
                Some(true)
            }
            Err(e) => {
                warn!("Failed to update volume with tags from VPC IaaS: {:?}", e);
                state
                    .events
                    .publish(&resource, EventType::Warning, reasons::VOLUME_METADATA_SAVED, &e.to_string())
                    .await;
                Some(false)
            }
        }
    } else {
        debug!("Skipping tag update as the volume did not just bind");
        None
    };

    Ok(TaskOutcome::Updated {
        metadata_saved,
        tags_synced,
    })
}
