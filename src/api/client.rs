//! HTTP client for the travel backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::TravelBackend;
use super::error::{Error, Operation, RequestFailure, Result};
use super::types::{
    ChatMessage, ChatReply, ChatRequest, Destination, HealthStatus, ItineraryDay,
    ItineraryResponse, SearchParams, SearchResults,
};

/// HTTP client for the travel backend API.
///
/// Every call is a single request/response cycle. There are no retries and no
/// client-side timeout beyond whatever the transport applies.
///
/// # Example
///
/// ```rust,no_run
/// use gujarat_travel_planner::api::{ApiClient, ChatMessage, SearchParams};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("http://localhost:5000")?;
///
/// let reply = client
///     .send_chat_message(&[ChatMessage::user("Best time to visit Kutch?")])
///     .await?;
///
/// let itinerary = client
///     .generate_itinerary(&SearchParams {
///         destination: Some("Dwarka".into()),
///         ..Default::default()
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The backend base URL (e.g., "http://localhost:5000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref().trim())?;
        // Relative joins below only keep a path prefix when it ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { base_url, http })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Send the conversation so far and return the assistant's reply.
    ///
    /// A 2xx response without a `message` field is a failure.
    pub async fn send_chat_message(&self, messages: &[ChatMessage]) -> Result<String> {
        let op = Operation::Chat;
        let response = self
            .http
            .post(self.url("api/chat"))
            .json(&ChatRequest { messages })
            .send()
            .await
            .map_err(|e| fail(op, e))?;
        let reply: ChatReply = Self::handle_response(op, response).await?;
        reply
            .message
            .ok_or_else(|| fail(op, RequestFailure::EmptyResponse))
    }

    /// Ask the backend for a day-by-day itinerary.
    pub async fn generate_itinerary(&self, params: &SearchParams) -> Result<Vec<ItineraryDay>> {
        let op = Operation::GenerateItinerary;
        let response = self
            .http
            .post(self.url("api/generate-itinerary"))
            .json(params)
            .send()
            .await
            .map_err(|e| fail(op, e))?;
        let body: ItineraryResponse = Self::handle_response(op, response).await?;
        debug!(name: "api.itinerary.received", days = body.itinerary.len(), "Itinerary received");
        Ok(body.itinerary)
    }

    /// Search destinations. Absent fields are left out of the query string.
    pub async fn search_destinations(&self, params: &SearchParams) -> Result<SearchResults> {
        let op = Operation::Search;
        let response = self
            .http
            .get(self.url("api/search"))
            .query(&params.query_pairs())
            .send()
            .await
            .map_err(|e| fail(op, e))?;
        Self::handle_response(op, response).await
    }

    /// Look up a single destination by backend id.
    pub async fn get_destination_details(&self, id: &str) -> Result<Destination> {
        let op = Operation::DestinationDetails;
        let mut url = self.url("api/destinations/");
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(id);
        }
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fail(op, e))?;
        Self::handle_response(op, response).await
    }

    /// Probe the backend's health endpoint.
    pub async fn health(&self) -> Result<HealthStatus> {
        let op = Operation::Health;
        let response = self
            .http
            .get(self.url("health"))
            .send()
            .await
            .map_err(|e| fail(op, e))?;
        Self::handle_response(op, response).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(path)
            .unwrap_or_else(|_| self.base_url.clone())
    }

    async fn handle_response<T: DeserializeOwned>(
        op: Operation,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response.json().await.map_err(|e| fail(op, e))
        } else {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".into());
            Err(fail(
                op,
                RequestFailure::Status {
                    status: status.as_u16(),
                    message,
                },
            ))
        }
    }
}

fn fail(op: Operation, cause: impl Into<RequestFailure>) -> Error {
    let err = Error::request_failed(op, cause);
    warn!(name: "api.request.failed", operation = %op, error = %err, "Backend request failed");
    err
}

#[async_trait]
impl TravelBackend for ApiClient {
    fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    async fn send_chat_message(&self, messages: &[ChatMessage]) -> Result<String> {
        ApiClient::send_chat_message(self, messages).await
    }

    async fn generate_itinerary(&self, params: &SearchParams) -> Result<Vec<ItineraryDay>> {
        ApiClient::generate_itinerary(self, params).await
    }

    async fn search_destinations(&self, params: &SearchParams) -> Result<SearchResults> {
        ApiClient::search_destinations(self, params).await
    }

    async fn get_destination_details(&self, id: &str) -> Result<Destination> {
        ApiClient::get_destination_details(self, id).await
    }
}
