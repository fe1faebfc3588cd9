/// Event domain types
use super::EventId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One event row as listed on the events screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    /// Unique event identifier
    pub id: EventId,

    /// Event name
    pub title: String,

    /// Whether the event is currently running
    pub is_active: bool,

    /// Minimum price per request, in the event's currency
    pub min_price: f64,

    /// Running earnings total
    pub total: f64,

    /// Cover image URL
    pub image_url: Option<String>,

    /// Scheduled start
    pub start: Option<DateTime<Utc>>,

    /// Scheduled end
    pub end: Option<DateTime<Utc>>,
}
