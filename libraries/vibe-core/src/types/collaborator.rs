/// Collaborator domain type
use serde::{Deserialize, Serialize};
use std::fmt;

/// Collaborator identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollaboratorId(i64);

impl CollaboratorId {
    /// Create a new collaborator ID
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the inner value
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CollaboratorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A revenue-share participant on an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    /// Unique collaborator identifier
    pub id: CollaboratorId,

    /// Display name
    pub name: String,

    /// Revenue share, in percent
    pub percentage: f64,
}
