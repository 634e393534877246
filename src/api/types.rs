//! Wire types for the travel backend.
//!
//! These mirror the backend's JSON contract and are shared by the client,
//! the widgets and the HTML renderers.

use serde::{Deserialize, Serialize};

// =============================================================================
// Chat
// =============================================================================

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The visitor.
    User,
    /// The AI travel assistant.
    Assistant,
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    /// Full transcript, oldest first.
    pub messages: &'a [ChatMessage],
}

/// Response of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatReply {
    /// Assistant reply. Backends may omit it on internal trouble.
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Search & itinerary
// =============================================================================

/// Structured travel query collected by the hero search form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Where the visitor wants to go.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// What the visitor wants to do.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    /// When the visitor wants to travel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Budget, free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

impl SearchParams {
    /// Query-string pairs for the fields that are present, in field order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("destination", &self.destination),
            ("activity", &self.activity),
            ("date", &self.date),
            ("budget", &self.budget),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    /// Whether a destination or an activity has been entered.
    #[must_use]
    pub fn has_subject(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.trim().is_empty());
        filled(&self.destination) || filled(&self.activity)
    }
}

/// One day of a generated itinerary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryDay {
    /// 1-based day number.
    pub day: u32,
    /// Short headline for the day.
    pub title: String,
    /// What happens that day.
    pub description: String,
}

/// Response of `POST /api/generate-itinerary`.
#[derive(Debug, Clone, Deserialize)]
pub struct ItineraryResponse {
    /// Days in backend order.
    pub itinerary: Vec<ItineraryDay>,
}

/// A destination known to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Backend identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    #[serde(default)]
    pub description: String,
    /// Category such as "Wildlife" or "Religious".
    #[serde(default)]
    pub category: String,
    /// Average rating out of five.
    #[serde(default)]
    pub rating: Option<f32>,
    /// Human-readable location.
    #[serde(default)]
    pub location: Option<String>,
    /// Recommended travel season.
    #[serde(default)]
    pub best_time: Option<String>,
}

/// Response of `GET /api/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Matching destinations.
    #[serde(default)]
    pub results: Vec<Destination>,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// Backend-reported status, `healthy` when all is well.
    pub status: String,
    /// Free-form detail.
    #[serde(default)]
    pub message: String,
}
