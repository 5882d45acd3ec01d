use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::pin::pin;
use std::sync::Arc;

use futures::{FutureExt, Stream, StreamExt};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::app_state::AppState;
use crate::core::client::watchers::VolumeEvent;
use crate::domain::volume::resource_filter::ResourceFilter;
use crate::scheduler::tasks::reconcile::task::{self, TaskOutcome};

/// How one dispatched task ended, as seen from the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskReport {
    Completed(TaskOutcome),
    Failed(String),
    Panicked(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub filtered_out: usize,
    pub dispatched: usize,
    pub completed: usize,
    pub failed: usize,
    pub panicked: usize,
}

impl DispatchSummary {
    fn record(&mut self, report: &TaskReport) {
        match report {
            TaskReport::Completed(_) => self.completed += 1,
            TaskReport::Failed(_) => self.failed += 1,
            TaskReport::Panicked(_) => self.panicked += 1,
        }
    }
}

/// Drives the volume event stream and runs one reconcile task per admitted
/// event. Tasks are independent: a failing or panicking task is logged and
/// never reaches the stream loop or its siblings.
pub struct Supervisor {
    state: AppState,
    filter: ResourceFilter,
    /// Concurrency ceiling. Tasks beyond it are spawned but wait for a permit.
    permits: Option<Arc<Semaphore>>,
}

impl Supervisor {
    pub fn new(state: AppState, max_concurrent_tasks: Option<usize>) -> Self {
        let filter = ResourceFilter::new(&*state.provisioner_name);
        Self {
            state,
            filter,
            permits: max_concurrent_tasks.map(|n| Arc::new(Semaphore::new(n))),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Runs until `events` ends, then waits for in-flight tasks.
    pub async fn run<S>(&self, events: S) -> DispatchSummary
    where
        S: Stream<Item = VolumeEvent>,
    {
        let mut events = pin!(events);
        let mut tasks: JoinSet<TaskReport> = JoinSet::new();
        let mut summary = DispatchSummary::default();

        loop {
            tokio::select! {
                next = events.next() => match next {
                    Some(event) => {
                        if self.filter.matches(Some(&event.new)) {
                            self.dispatch(&mut tasks, event);
                            summary.dispatched += 1;
                        } else {
                            summary.filtered_out += 1;
                        }
                    }
                    None => break,
                },
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    summary.record(&reap(joined));
                }
            }
        }

        info!("Volume event stream ended, waiting for {} task(s)", tasks.len());
        while let Some(joined) = tasks.join_next().await {
            summary.record(&reap(joined));
        }

        summary
    }

    fn dispatch(&self, tasks: &mut JoinSet<TaskReport>, event: VolumeEvent) {
        let request_id = Uuid::new_v4();
        let span = info_span!("reconcile", %request_id, pv = %event.new.name);
        let state = self.state.clone();
        let permits = self.permits.clone();

        tasks.spawn(
            async move {
                // Only fails once the semaphore is closed, which never happens
                let _permit = match permits {
                    Some(permits) => permits.acquire_owned().await.ok(),
                    None => None,
                };

                let result = AssertUnwindSafe(task::run(&state, &event))
                    .catch_unwind()
                    .await;

                match result {
                    Ok(Ok(outcome)) => {
                        debug!(?outcome, "Exit reconcile()");
                        TaskReport::Completed(outcome)
                    }
                    Ok(Err(e)) => {
                        warn!(%request_id, "Reconcile skipped, no provider session: {}", e);
                        TaskReport::Failed(e.to_string())
                    }
                    Err(panic) => {
                        let message = panic_message(panic.as_ref());
                        error!(%request_id, "Recovered from panic in pv watcher: {}", message);
                        TaskReport::Panicked(message)
                    }
                }
            }
            .instrument(span),
        );
    }
}

fn reap(joined: Result<TaskReport, JoinError>) -> TaskReport {
    match joined {
        Ok(report) => report,
        Err(e) if e.is_panic() => {
            error!(error = ?e, "Reconcile task panicked outside its boundary");
            TaskReport::Panicked(e.to_string())
        }
        Err(e) => {
            warn!(error = ?e, "Reconcile task cancelled");
            TaskReport::Failed(e.to_string())
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
