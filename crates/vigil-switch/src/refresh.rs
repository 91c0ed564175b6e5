//! Cancelable periodic state refresh.
//!
//! Display layers want a recent `SwitchState` without polling the
//! controller themselves. `StateRefresher` re-derives the state at a fixed
//! interval and publishes it over a `watch` channel; it never mutates
//! controller state, and tearing it down (explicitly or by drop) leaves no
//! task running.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use vigil_core::SwitchState;

use crate::controller::SwitchController;

/// Background task that periodically republishes the derived switch state
#[derive(Debug)]
pub struct StateRefresher {
    shutdown_tx: watch::Sender<bool>,
    handle: JoinHandle<()>,
    rx: watch::Receiver<SwitchState>,
}

impl StateRefresher {
    /// Spawn a refresh task ticking at `interval`.
    ///
    /// The channel starts out holding the state as of spawn time, so
    /// subscribers always have something to render. Intervals at or below
    /// 60 seconds keep the countdown display honest to the minute.
    pub async fn spawn(controller: Arc<SwitchController>, interval: Duration) -> Self {
        let initial = controller.current_state().await;
        let (tx, rx) = watch::channel(initial);
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => break,
                    _ = ticker.tick() => {
                        let state = controller.current_state().await;
                        if tx.send(state).is_err() {
                            // every receiver is gone, nothing left to refresh for
                            break;
                        }
                    }
                }
            }
            tracing::debug!("state refresher stopped");
        });

        Self {
            shutdown_tx,
            handle,
            rx,
        }
    }

    /// Receiver for the latest published state
    pub fn subscribe(&self) -> watch::Receiver<SwitchState> {
        self.rx.clone()
    }

    /// Latest published state
    pub fn latest(&self) -> SwitchState {
        self.rx.borrow().clone()
    }

    /// Stop the refresh task
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
        self.handle.abort();
    }
}

impl Drop for StateRefresher {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
        self.handle.abort();
    }
}
