//! VibeQueue Server Client
//!
//! HTTP client library for the VibeQueue backend API.
//!
//! # Features
//!
//! - **Authentication**: login, registration, password change
//! - **Events**: list, detail snapshot (queue/playlist/history), create,
//!   modify, delete
//! - **Song requests**: accept, reject, start playing, finish playing
//! - **Earnings**: overview, per-event graph, cash out, payout history
//! - **Collaborators**: list, add, remove
//! - **Profile**: payment onboarding, application info, image upload
//!
//! # Example
//!
//! ```ignore
//! use vibe_server_client::{ClientConfig, VibeServerClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VibeServerClient::new(ClientConfig::new("https://api.example.com"))?;
//!     client.login("organizer", "password").await?;
//!
//!     for event in client.events().await?.get_all_events().await? {
//!         println!("{} (active: {})", event.name, event.is_active);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod collaborators;
mod earnings;
mod envelope;
mod error;
mod events;
mod profile;
mod requests;
mod types;

// Re-export main types
pub use client::VibeServerClient;
pub use error::{ClientError, Result};
pub use types::{
    ApplicationInfo, CashOutRequest, ClientConfig, CollaboratorRow, ConnectPaymentResponse,
    CreateEventRequest, EarningsGraph, EarningsGraphEntry, EarningsOverview, EventDetails,
    EventRow, FinishedSongRow, LoginResponse, ModifyEventRequest, ModifyState, NewCollaborator,
    PaymentInfo, PayoutRecord, ProfileInfo, SongRow,
};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use collaborators::CollaboratorsClient;
pub use earnings::EarningsClient;
pub use events::EventsClient;
pub use profile::ProfileClient;
pub use requests::RequestsClient;
