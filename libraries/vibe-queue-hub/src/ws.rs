//! WebSocket implementation of the queue hub.

use crate::error::{HubError, Result};
use crate::hub::{HubSubscription, QueueHub};
use crate::protocol::{ClientFrame, ServerFrame};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use vibe_core::EventId;

type WsStream = WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>;

/// Queue hub client connecting over WebSocket.
///
/// Each [`subscribe`](QueueHub::subscribe) call opens its own
/// connection scoped to one event, so concurrent event views (and
/// tests) never share connection state.
pub struct WsQueueHub {
    hub_url: String,
}

impl WsQueueHub {
    /// Create a new hub client targeting the given hub endpoint
    /// (e.g. `wss://api.example.com/queuehub`).
    pub fn new(hub_url: impl Into<String>) -> Self {
        Self {
            hub_url: hub_url.into(),
        }
    }

    /// The hub endpoint URL.
    pub fn hub_url(&self) -> &str {
        &self.hub_url
    }
}

#[async_trait]
impl QueueHub for WsQueueHub {
    async fn subscribe(&self, event_id: &EventId) -> Result<HubSubscription> {
        let (mut ws_stream, _response) = connect_async(&self.hub_url).await.map_err(|e| {
            HubError::Connection(format!(
                "Failed to connect to queue hub at {}: {e}",
                self.hub_url
            ))
        })?;

        let join = ClientFrame::JoinEventGroup {
            event_id: event_id.to_string(),
        };
        let frame = serde_json::to_string(&join)
            .map_err(|e| HubError::Protocol(format!("cannot encode join frame: {e}")))?;
        ws_stream
            .send(Message::Text(frame))
            .await
            .map_err(|e| HubError::Connection(format!("failed to join event group: {e}")))?;

        info!(event_id = %event_id, "Joined queue hub group");

        let (tx, rx) = mpsc::unbounded_channel();
        let (close_tx, close_rx) = oneshot::channel();

        tokio::spawn(pump(ws_stream, event_id.clone(), tx, close_rx));

        Ok(HubSubscription::new(rx, close_tx))
    }
}

/// Forward pushes from the socket into the subscription channel until
/// the subscription closes or the connection ends.
async fn pump(
    mut ws_stream: WsStream,
    event_id: EventId,
    tx: mpsc::UnboundedSender<crate::protocol::IncomingSong>,
    mut close_rx: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            _ = &mut close_rx => {
                let leave = ClientFrame::LeaveEventGroup {
                    event_id: event_id.to_string(),
                };
                if let Ok(frame) = serde_json::to_string(&leave) {
                    let _ = ws_stream.send(Message::Text(frame)).await;
                }
                let _ = ws_stream.close(None).await;
                info!(event_id = %event_id, "Left queue hub group");
                return;
            }
            message = ws_stream.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<ServerFrame>(&text) {
                            Ok(ServerFrame::SongEnteredQueue { payload }) => {
                                debug!(event_id = %event_id, request_id = %payload.id,
                                    "Song entered queue");
                                if tx.send(payload).is_err() {
                                    // Consumer gone, shut the connection down.
                                    let _ = ws_stream.close(None).await;
                                    return;
                                }
                            }
                            Err(e) => {
                                warn!(event_id = %event_id, error = %e,
                                    "Ignoring unparseable hub frame");
                            }
                        }
                    }
                    Some(Ok(Message::Ping(_) | Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) | None => {
                        debug!(event_id = %event_id, "Queue hub connection closed");
                        return;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        warn!(event_id = %event_id, error = %e, "Queue hub read error");
                        return;
                    }
                }
            }
        }
    }
}
