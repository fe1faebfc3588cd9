mod collaborator;
mod event;
mod ids;
mod song_request;

pub use collaborator::{Collaborator, CollaboratorId};
pub use event::EventSummary;
pub use ids::{EventId, RequestId};
pub use song_request::{LifecycleState, SongRequest};
