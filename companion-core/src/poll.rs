//! Timed refresh of the active view.

use crate::session::SharedSession;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// How often the active view reloads from the store.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Handle to a running refresh task. The task stops when this is dropped.
#[derive(Debug)]
pub struct RefreshHandle {
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Stop the task and wait until it has let go of the session.
    pub async fn shutdown(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            // Cancellation is the expected outcome
            let _ = task.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map(|t| t.is_finished()).unwrap_or(true)
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Refresh `session` every `interval` until the handle is dropped.
///
/// The first refresh happens one interval after spawning. The session is
/// locked only to build the request and to swap in the result, never while
/// the store is being read. A failed refresh is logged and the next tick
/// tries again.
pub fn spawn_refresh(session: SharedSession, interval: Duration) -> RefreshHandle {
    let task = tokio::spawn(async move {
        let mut ticker = time::interval_at(time::Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let request = session.lock().await.refresh_request();
            match request.load().await {
                Ok(refreshed) => {
                    let mut session = session.lock().await;
                    if session.apply_refresh(refreshed) {
                        debug!(view = ?session.view(), "Polled store");
                    }
                }
                Err(e) => warn!(error = %e, "Refresh failed"),
            }
        }
    });
    RefreshHandle { task: Some(task) }
}
