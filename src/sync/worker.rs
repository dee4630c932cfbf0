//! Background task feeding sync events into the cache.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::config::SyncConfig;
use crate::sync::event::DataEvent;
use crate::sync::subscriber::CacheSubscriber;

/// Owns the receiving half of the event channel.
pub struct SyncWorker {
    subscriber: CacheSubscriber,
    events: mpsc::Receiver<DataEvent>,
}

impl SyncWorker {
    /// Create a worker and the sender producers push events into.
    pub fn new(
        subscriber: CacheSubscriber,
        config: &SyncConfig,
    ) -> (Self, mpsc::Sender<DataEvent>) {
        let (tx, events) = mpsc::channel(config.channel_capacity);
        (Self { subscriber, events }, tx)
    }

    /// Drain events until every sender is dropped or shutdown fires.
    ///
    /// Returns the number of events applied.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) -> usize {
        tracing::info!("Sync worker started");
        let mut applied = 0;
        loop {
            tokio::select! {
                event = self.events.recv() => match event {
                    Some(event) => {
                        self.subscriber.apply(event);
                        applied += 1;
                    }
                    None => {
                        tracing::info!(applied, "Event channel closed, sync worker stopping");
                        break;
                    }
                },
                _ = shutdown.recv() => {
                    tracing::info!(applied, "Shutdown signal received, sync worker stopping");
                    break;
                }
            }
        }
        applied
    }

    /// Run on the current Tokio runtime.
    pub fn spawn(self, shutdown: broadcast::Receiver<()>) -> JoinHandle<usize> {
        tokio::spawn(self.run(shutdown))
    }
}
