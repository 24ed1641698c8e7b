//! Update source trait definitions.

use crate::error::DataError;
use crate::types::FeedEvent;
use async_trait::async_trait;
use tokio::sync::mpsc;

/// Trait for sources of ordered feed events.
#[async_trait]
pub trait UpdateSource: Send + Sync {
    /// Load every event, ordered from oldest to newest.
    async fn load_all(&self) -> Result<Vec<FeedEvent>, DataError>;

    /// Stream the events through a bounded channel.
    ///
    /// The default implementation loads everything and forwards it from a
    /// spawned task. The channel closes after the last event.
    ///
    /// # Arguments
    /// * `buffer` - Channel capacity
    async fn subscribe(&self, buffer: usize) -> Result<mpsc::Receiver<FeedEvent>, DataError> {
        let events = self.load_all().await?;
        let (tx, rx) = mpsc::channel(buffer.max(1));

        tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }

    /// Get the source name.
    fn name(&self) -> &str;
}
