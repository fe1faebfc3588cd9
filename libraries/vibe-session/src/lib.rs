//! VibeQueue Event Session
//!
//! The song lifecycle synchronizer for one open event: three disjoint
//! request buckets (queue, playlist, history) seeded from a snapshot
//! fetch, mutated by server-confirmed transitions and by "song entered
//! queue" pushes from the queue hub.
//!
//! - [`EventView`]: the three buckets plus event metadata and the
//!   running earnings total
//! - [`EventSession`]: owns the view and its hub subscription, applies
//!   accept/reject/start/finish transitions and push ingestion
//! - [`RequestAuthority`]: the backend contract the session calls for
//!   every transition
//! - [`PlaybackTimer`]: the injected countdown pacing playback

#![forbid(unsafe_code)]

mod authority;
mod error;
mod session;
mod timer;
mod view;

pub use authority::RequestAuthority;
pub use error::{Result, SessionError};
pub use session::EventSession;
pub use timer::{FixedPlaybackTimer, PlaybackTimer, PLAYBACK_DURATION};
pub use view::EventView;
