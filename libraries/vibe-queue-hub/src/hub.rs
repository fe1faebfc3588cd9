//! Subscription handle and the hub abstraction.

use crate::error::Result;
use crate::protocol::IncomingSong;
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use vibe_core::EventId;

/// A per-event source of "song entered queue" pushes.
///
/// Implemented by [`WsQueueHub`](crate::WsQueueHub) for the real
/// backend; tests supply in-process implementations.
#[async_trait]
pub trait QueueHub: Send + Sync {
    /// Join the delivery group for `event_id` and start receiving
    /// pushes. The subscription lives until unsubscribed or dropped.
    async fn subscribe(&self, event_id: &EventId) -> Result<HubSubscription>;
}

/// A live subscription to one event's queue pushes.
///
/// Dropping the subscription (or calling [`unsubscribe`]) signals the
/// connection task to leave the event group and close; deliveries that
/// race with teardown are discarded, never handed to a closed consumer.
///
/// [`unsubscribe`]: HubSubscription::unsubscribe
pub struct HubSubscription {
    receiver: mpsc::UnboundedReceiver<IncomingSong>,
    close_tx: Option<oneshot::Sender<()>>,
}

impl HubSubscription {
    /// Assemble a subscription from its channel halves. The `close_tx`
    /// side is signalled on unsubscribe/drop.
    pub fn new(
        receiver: mpsc::UnboundedReceiver<IncomingSong>,
        close_tx: oneshot::Sender<()>,
    ) -> Self {
        Self {
            receiver,
            close_tx: Some(close_tx),
        }
    }

    /// Receive the next push, waiting until one arrives or the
    /// connection ends.
    pub async fn recv(&mut self) -> Option<IncomingSong> {
        self.receiver.recv().await
    }

    /// Take one already-delivered push without waiting.
    pub fn try_recv(&mut self) -> Option<IncomingSong> {
        self.receiver.try_recv().ok()
    }

    /// Leave the event group and tear the subscription down.
    pub async fn unsubscribe(mut self) {
        if let Some(close_tx) = self.close_tx.take() {
            let _ = close_tx.send(());
        }
        // Drain and discard anything that raced with the close signal.
        self.receiver.close();
        while self.receiver.try_recv().is_ok() {}
    }
}

impl Drop for HubSubscription {
    fn drop(&mut self) {
        if let Some(close_tx) = self.close_tx.take() {
            let _ = close_tx.send(());
        }
    }
}
