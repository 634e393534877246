//! Travel backend API.
//!
//! The backend is an external HTTP service that produces chat replies and
//! itineraries. This module holds its wire types, the reqwest-based
//! [`ApiClient`], and the [`TravelBackend`] trait the widgets are written
//! against.
//!
//! # Endpoints
//!
//! | Endpoint | Method | Consumed |
//! |---|---|---|
//! | `/api/chat` | POST | `message` |
//! | `/api/generate-itinerary` | POST | `itinerary` |
//! | `/api/search` | GET | `results` |
//! | `/api/destinations/{id}` | GET | whole body |
//! | `/health` | GET | whole body |

pub mod client;
pub mod error;
pub mod types;

pub use client::ApiClient;
pub use error::{Error, Operation, RequestFailure, Result};
pub use types::{
    ChatMessage, Destination, HealthStatus, ItineraryDay, Role, SearchParams, SearchResults,
};

use async_trait::async_trait;

/// Operations the widgets need from the travel backend.
///
/// [`ApiClient`] is the HTTP implementation; tests plug in in-memory fakes.
#[async_trait]
pub trait TravelBackend: Send + Sync + std::fmt::Debug {
    /// Base URL shown to visitors when the backend cannot be reached.
    fn base_url(&self) -> &str;

    /// Send the transcript and return the assistant's reply.
    async fn send_chat_message(&self, messages: &[ChatMessage]) -> Result<String>;

    /// Generate a day-by-day itinerary for the query.
    async fn generate_itinerary(&self, params: &SearchParams) -> Result<Vec<ItineraryDay>>;

    /// Search destinations matching the query.
    async fn search_destinations(&self, params: &SearchParams) -> Result<SearchResults>;

    /// Fetch one destination.
    async fn get_destination_details(&self, id: &str) -> Result<Destination>;
}
