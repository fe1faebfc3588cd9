//! VibeQueue Core
//!
//! Platform-agnostic domain types for the VibeQueue organizer client.
//!
//! This crate provides the foundational building blocks shared by the
//! server client, the queue hub client, and the event session:
//! - **Ids**: `EventId`, `RequestId`, `CollaboratorId`
//! - **Domain Types**: `SongRequest`, `LifecycleState`, `EventSummary`,
//!   `Collaborator`
//!
//! # Example
//!
//! ```rust
//! use vibe_core::types::{LifecycleState, RequestId, SongRequest};
//!
//! let request = SongRequest::new(
//!     RequestId::new("42"),
//!     "Take Five",
//!     "The Dave Brubeck Quartet",
//! );
//! assert_eq!(request.state, LifecycleState::Queued);
//! ```

#![forbid(unsafe_code)]

pub mod types;
pub mod wire;

// Re-export commonly used types
pub use types::{
    Collaborator, CollaboratorId, EventId, EventSummary, LifecycleState, RequestId, SongRequest,
};
