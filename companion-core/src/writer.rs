//! Ordered background writes of character snapshots.
//!
//! A session hands every new snapshot to one writer task, which writes them
//! to the store one at a time in the order they were queued. A later edit
//! therefore always lands after an earlier one.

use crate::store::DocumentStore;
use crate::world::Character;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

enum Request {
    Put(Character),
    Barrier(oneshot::Sender<()>),
}

/// Handle to a session's writer task. The task exits once every handle is
/// dropped and the queue is drained.
#[derive(Debug, Clone)]
pub struct SnapshotWriter {
    tx: mpsc::UnboundedSender<Request>,
}

impl SnapshotWriter {
    /// Start the writer task. Must be called inside a tokio runtime.
    pub fn spawn(store: Arc<dyn DocumentStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, rx));
        Self { tx }
    }

    /// Queue a snapshot behind every write queued before it.
    pub fn write(&self, character: Character) {
        let id = character.id;
        if self.tx.send(Request::Put(character)).is_err() {
            warn!(character = %id, "Writer stopped, snapshot not persisted");
        }
    }

    /// A future that resolves once every snapshot queued before this call
    /// has been written or has failed. It doesn't borrow the writer, so it
    /// can be awaited without holding the session.
    pub fn barrier(&self) -> impl Future<Output = ()> + Send + 'static {
        let (done, wait) = oneshot::channel();
        let queued = self.tx.send(Request::Barrier(done)).is_ok();
        async move {
            if queued {
                // A dropped sender means the task is gone and nothing is pending
                let _ = wait.await;
            }
        }
    }

    /// Wait for every write queued so far.
    pub async fn flush(&self) {
        self.barrier().await
    }
}

async fn run(store: Arc<dyn DocumentStore>, mut rx: mpsc::UnboundedReceiver<Request>) {
    while let Some(request) = rx.recv().await {
        match request {
            Request::Put(character) => match store.put_character(character.id, &character).await {
                Ok(()) => debug!(character = %character.id, "Persisted character"),
                Err(e) => {
                    warn!(character = %character.id, error = %e, "Failed to persist character")
                }
            },
            Request::Barrier(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::CharacterId;
    use crate::store::MemoryStore;
    use crate::testing::SlowStore;
    use crate::world::Role;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_newest_snapshot_lands_last() {
        let store = Arc::new(SlowStore::new());
        store.delay_next_write(Duration::from_millis(200)).await;
        let writer = SnapshotWriter::spawn(store.clone());

        let mut character = Character::new_for(CharacterId::new(), "Aria", Role::Player);
        character.hit_points.current = 7;
        writer.write(character.clone());
        character.hit_points.current = 5;
        writer.write(character.clone());
        writer.flush().await;

        let stored = store.get_character(character.id).await.unwrap().unwrap();
        assert_eq!(stored.hit_points.current, 5);
    }

    #[tokio::test]
    async fn test_barrier_outlives_the_handle() {
        let store = Arc::new(MemoryStore::new());
        let writer = SnapshotWriter::spawn(store.clone());
        let character = Character::new_for(CharacterId::new(), "Aria", Role::Player);

        writer.write(character.clone());
        let landed = writer.barrier();
        drop(writer);
        landed.await;

        assert_eq!(store.get_character(character.id).await.unwrap(), Some(character));
    }
}
