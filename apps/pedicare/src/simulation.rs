//! # Ambulance Dispatch Simulation
//!
//! Plays a [`DispatchTimeline`] on tokio timers.
//!
//! The status is published on a `watch` channel: subscribers always see the
//! latest status and can wait for the next change. Nothing is sent to a real
//! dispatch service.

use pedicare_core::{AmbulanceStatus, DispatchTimeline};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// A running dispatch simulation.
#[derive(Debug)]
pub struct DispatchHandle {
    status: watch::Receiver<AmbulanceStatus>,
    task: JoinHandle<()>,
}

/// Start playing `timeline`. The initial status is visible immediately.
pub fn spawn_dispatch(timeline: DispatchTimeline) -> DispatchHandle {
    let (tx, rx) = watch::channel(timeline.initial_status());
    info!(status = %timeline.initial_status(), "ambulance dispatched");

    let task = tokio::spawn(async move {
        let start = tokio::time::Instant::now();
        for step in timeline.steps().iter().skip(1) {
            tokio::time::sleep_until(start + Duration::from_millis(step.offset_ms)).await;
            debug!(offset_ms = step.offset_ms, status = %step.status, "ambulance status changed");
            if tx.send(step.status).is_err() {
                // every receiver is gone
                return;
            }
        }
    });

    DispatchHandle { status: rx, task }
}

impl DispatchHandle {
    /// The status in effect right now.
    pub fn current(&self) -> AmbulanceStatus {
        *self.status.borrow()
    }

    /// A receiver for following status changes.
    pub fn subscribe(&self) -> watch::Receiver<AmbulanceStatus> {
        self.status.clone()
    }

    /// Whether the last step has been published.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the simulation. The last published status stays readable.
    pub fn cancel(&self) {
        self.task.abort();
        debug!("ambulance simulation cancelled");
    }

    /// Wait until every step has been published (or the task was cancelled)
    /// and return the final status.
    pub async fn wait(mut self) -> AmbulanceStatus {
        let _ = (&mut self.task).await;
        *self.status.borrow()
    }
}

impl Drop for DispatchHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// =============================================================================
// TESTS
// =============================================================================
