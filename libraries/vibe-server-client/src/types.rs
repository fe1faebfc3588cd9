//! Types for VibeQueue backend API requests and responses.
//!
//! The backend serializes most payload fields in PascalCase and is
//! inconsistent about whether numeric ids arrive as numbers or strings,
//! so wire types carry explicit `rename` attributes and a tolerant id
//! deserializer.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use vibe_core::types::{Collaborator, CollaboratorId, EventId, EventSummary, LifecycleState,
    RequestId, SongRequest};
use vibe_core::wire::string_or_number;

/// Configuration for connecting to a VibeQueue backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g. "https://vibequeue-api.example.com")
    pub url: String,
    /// Current access token (if authenticated)
    pub access_token: Option<String>,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: None,
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            access_token: Some(access_token.into()),
        }
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(transparent)]
    struct Wrapper(#[serde(deserialize_with = "string_or_number")] String);

    Option::<Wrapper>::deserialize(deserializer).map(|opt| opt.map(|w| w.0))
}

/// Parse a backend timestamp, which is RFC 3339 with or without offset.
pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for `/User/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response from `/User/login`. Unlike most endpoints this one is not
/// wrapped in the success/message envelope.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "AccessToken")]
    pub access_token: Option<String>,
    #[serde(rename = "UserName")]
    pub username: Option<String>,
    #[serde(rename = "Usercode")]
    pub user_code: Option<String>,
    #[serde(rename = "ImageUrl")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Request body for `/User/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    #[serde(rename = "referalCode", skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

/// Request body for `/User/changepassword`.
#[derive(Debug, Serialize)]
pub struct ChangePasswordRequest {
    pub currentpassword: String,
    pub newpassword: String,
}

/// Profile info from `/User/getProfileInfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInfo {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Usercode")]
    pub user_code: Option<String>,
    #[serde(rename = "ImageUrl")]
    pub image_url: Option<String>,
}

// =============================================================================
// Event Types
// =============================================================================

/// One event as returned by `/Event/getAllEvents` and inside
/// `getEventById`'s `mEvent` field.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRow {
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "IsActive")]
    pub is_active: bool,
    #[serde(rename = "MinPrice")]
    pub min_price: f64,
    #[serde(rename = "Code", default)]
    pub code: Option<String>,
    #[serde(rename = "ImageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "Start", default)]
    pub start: Option<String>,
    #[serde(rename = "End", default)]
    pub end: Option<String>,
}

impl EventRow {
    /// Convert to the domain summary type.
    pub fn into_summary(self, total: f64) -> EventSummary {
        EventSummary {
            id: EventId::new(self.id),
            title: self.name,
            is_active: self.is_active,
            min_price: self.min_price,
            total,
            image_url: self.image_url,
            start: self.start.as_deref().and_then(parse_timestamp),
            end: self.end.as_deref().and_then(parse_timestamp),
        }
    }
}

/// One song row inside event details, queue hub pushes, and song request
/// confirmations.
#[derive(Debug, Clone, Deserialize)]
pub struct SongRow {
    #[serde(rename = "ID", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "SongName")]
    pub song_name: String,
    #[serde(rename = "ArtistName")]
    pub artist_name: String,
    #[serde(rename = "Votes", default)]
    pub votes: i64,
    #[serde(rename = "ImageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "Timestamp", default)]
    pub timestamp: Option<String>,
    #[serde(rename = "State", default)]
    pub state: Option<i64>,
}

impl SongRow {
    /// Convert to a domain request in the given lifecycle state.
    pub fn into_request(self, state: LifecycleState) -> SongRequest {
        SongRequest {
            id: RequestId::new(self.id),
            title: self.song_name,
            artist: self.artist_name,
            image_url: self.image_url,
            likes: self.votes,
            state,
            timestamp: self.timestamp.as_deref().and_then(parse_timestamp),
        }
    }

    /// Convert a history row, mapping the backend's `State` code.
    pub fn into_history_request(self) -> SongRequest {
        let state = LifecycleState::from_history_code(self.state.unwrap_or(0));
        self.into_request(state)
    }
}

/// Full event snapshot from `/Event/getEventById`.
#[derive(Debug, Clone, Deserialize)]
pub struct EventDetails {
    #[serde(rename = "mEvent")]
    pub event: EventRow,
    #[serde(rename = "eventTotalEarnings")]
    pub total_earnings: f64,
    #[serde(default)]
    pub playlist: Vec<SongRow>,
    #[serde(default)]
    pub queue: Vec<SongRow>,
    #[serde(default)]
    pub history: Vec<SongRow>,
}

/// Request body for `/Event/createEvent`.
#[derive(Debug, Serialize)]
pub struct CreateEventRequest {
    pub eventname: String,
    pub minprice: f64,
    pub start: String,
    pub end: String,
    pub collaborators: Vec<NewCollaborator>,
}

/// Request body for `/Event/modifyEvent`.
#[derive(Debug, Serialize)]
pub struct ModifyEventRequest {
    pub eventid: String,
    pub eventname: String,
    pub minprice: f64,
    pub start: String,
    pub end: String,
    pub collaborators: Vec<NewCollaborator>,
}

/// Collaborator entry inside event create/modify bodies.
#[derive(Debug, Clone, Serialize)]
pub struct NewCollaborator {
    pub id: String,
    pub name: String,
    pub percentage: f64,
}

// =============================================================================
// Song Request Types
// =============================================================================

/// Target state for `/SongRequest/modifySongRequest`.
///
/// The backend expects the state as a stringly numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifyState {
    /// Finished playing
    Finished,
    /// Rejected by the organizer
    Rejected,
    /// Accepted onto the play queue
    OnPlayQueue,
}

impl ModifyState {
    /// The backend's wire code for this state.
    pub fn code(self) -> &'static str {
        match self {
            Self::Finished => "1",
            Self::Rejected => "2",
            Self::OnPlayQueue => "3",
        }
    }
}

/// Request body for `/SongRequest/modifySongRequest`.
#[derive(Debug, Serialize)]
pub struct ModifySongRequest {
    pub songrequestid: String,
    pub state: String,
    pub eventid: String,
}

/// Request body for `/SongRequest/startPlayingSong`.
#[derive(Debug, Serialize)]
pub struct StartPlayingRequest {
    pub songrequestid: String,
    pub eventid: String,
}

/// Payment details attached to a finished song confirmation.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentInfo {
    #[serde(rename = "ConvertedPayedAmount")]
    pub converted_amount: f64,
}

/// Confirmation payload for a finished song: the canonical song record
/// plus the payment that completing playback collected.
#[derive(Debug, Clone, Deserialize)]
pub struct FinishedSongRow {
    #[serde(flatten)]
    pub song: SongRow,
    #[serde(rename = "Payment")]
    pub payment: PaymentInfo,
}

// =============================================================================
// Earnings Types
// =============================================================================

/// Response from `/Earnings/getEarningScreenProbs`.
#[derive(Debug, Clone, Deserialize)]
pub struct EarningsOverview {
    #[serde(rename = "IsPaymentConnected")]
    pub is_payment_connected: bool,
    #[serde(rename = "WithdrawableAmount")]
    pub withdrawable_amount: f64,
}

/// Request body for `/Earnings/cashOut`.
#[derive(Debug, Serialize)]
pub struct CashOutRequest {
    #[serde(rename = "AmountCents")]
    pub amount_cents: i64,
    #[serde(rename = "Currency")]
    pub currency: String,
}

/// Per-event earnings entry from `/Earnings/getGraphData`.
#[derive(Debug, Clone, Deserialize)]
pub struct EarningsGraphEntry {
    #[serde(rename = "Id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Amount")]
    pub amount: f64,
}

/// Response from `/Earnings/getGraphData`.
#[derive(Debug, Clone, Deserialize)]
pub struct EarningsGraph {
    pub graphdata: Vec<EarningsGraphEntry>,
    pub totalearnings: f64,
}

/// One payout record from `/History/getHistory`. This endpoint returns a
/// bare JSON array, not the usual envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct PayoutRecord {
    #[serde(rename = "Id", deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "ConvertedAmount")]
    pub converted_amount: f64,
    #[serde(rename = "RequestedAt")]
    pub requested_at: String,
    #[serde(rename = "Success")]
    pub success: bool,
    #[serde(rename = "CompletedAt", default)]
    pub completed_at: Option<String>,
    #[serde(rename = "StripeTransferId", default)]
    pub stripe_transfer_id: Option<String>,
    #[serde(rename = "Last4Digits", default, deserialize_with = "opt_string_or_number")]
    pub last4_digits: Option<String>,
}

// =============================================================================
// Collaborator Types
// =============================================================================

/// One collaborator row from `/Collaborator/getAllCollaborators`.
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorRow {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub percentage: f64,
}

impl CollaboratorRow {
    /// Convert to the domain collaborator type.
    pub fn into_collaborator(self) -> Option<Collaborator> {
        let id = self.id.parse().ok()?;
        Some(Collaborator {
            id: CollaboratorId::new(id),
            name: self.name,
            percentage: self.percentage,
        })
    }
}

/// Request body for `/Collaborator/addCollaborator`.
#[derive(Debug, Serialize)]
pub struct AddCollaboratorRequest {
    pub eventid: String,
    pub usercode: String,
    pub percentage: f64,
}

/// Request body for `/Collaborator/deleteCollaborator`.
#[derive(Debug, Serialize)]
pub struct DeleteCollaboratorRequest {
    #[serde(rename = "eventId")]
    pub event_id: String,
    #[serde(rename = "collaboratorId")]
    pub collaborator_id: i64,
}

// =============================================================================
// Profile Types
// =============================================================================

/// Response from `/Profile/connectPayment`: an onboarding URL to open.
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectPaymentResponse {
    pub url: String,
}

/// Response from `/Profile/getApplicationInfo`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationInfo {
    #[serde(rename = "Version", default)]
    pub version: Option<String>,
    #[serde(rename = "Description", default)]
    pub description: Option<String>,
}

/// Request body for `/File/uploadProfileImage`.
#[derive(Debug, Serialize)]
pub struct UploadImageRequest {
    #[serde(rename = "base64Image")]
    pub base64_image: String,
    #[serde(rename = "contentType")]
    pub content_type: String,
}
