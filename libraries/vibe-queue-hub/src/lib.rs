//! VibeQueue Queue Hub Client
//!
//! Real-time client for the per-event queue hub. The hub pushes a
//! "song entered queue" notification whenever an attendee submits a new
//! request for an event the client has joined.
//!
//! Delivery is at-least-once with no ordering guarantee; consumers own
//! deduplication decisions. A subscription is scoped to one event and
//! stops delivering the moment it is unsubscribed or dropped.
//!
//! # Example
//!
//! ```ignore
//! use vibe_queue_hub::{QueueHub, WsQueueHub};
//!
//! let hub = WsQueueHub::new("wss://api.example.com/queuehub");
//! let mut subscription = hub.subscribe(&event_id).await?;
//!
//! while let Some(song) = subscription.recv().await {
//!     println!("new request: {}", song.song_name);
//! }
//! ```

mod error;
mod hub;
mod protocol;
mod ws;

pub use error::{HubError, Result};
pub use hub::{HubSubscription, QueueHub};
pub use protocol::{ClientFrame, IncomingSong, ServerFrame};
pub use ws::WsQueueHub;
