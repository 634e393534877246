//! Shared fixtures for server integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use gujarat_travel_planner::AppState;
use gujarat_travel_planner::api::{
    ChatMessage, Destination, Error, ItineraryDay, Operation, RequestFailure, Result,
    SearchParams, SearchResults, TravelBackend,
};
use gujarat_travel_planner::server::router;
use gujarat_travel_planner::session::SessionStore;
use tokio::sync::Notify;

pub const BACKEND_URL: &str = "http://localhost:5000";

/// Holds a backend call open until the test releases it.
#[derive(Debug, Default)]
pub struct Gate {
    pub entered: Notify,
    pub release: Notify,
}

/// Backend with canned answers and call accounting.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    chat_reply: Option<String>,
    itinerary: Option<Vec<ItineraryDay>>,
    gate: Option<Arc<Gate>>,
    chat_calls: AtomicUsize,
    itinerary_calls: AtomicUsize,
    last_messages: Mutex<Vec<ChatMessage>>,
    last_params: Mutex<Option<SearchParams>>,
}

impl ScriptedBackend {
    /// Every call fails as if the backend were down.
    pub fn down() -> Self {
        Self::default()
    }

    pub fn replying(reply: &str) -> Self {
        Self {
            chat_reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub fn with_itinerary(mut self, days: Vec<ItineraryDay>) -> Self {
        self.itinerary = Some(days);
        self
    }

    pub fn gated(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub fn itinerary_calls(&self) -> usize {
        self.itinerary_calls.load(Ordering::SeqCst)
    }

    pub fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }

    pub fn last_params(&self) -> Option<SearchParams> {
        self.last_params.lock().unwrap().clone()
    }

    async fn wait_at_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }
    }
}

fn unavailable(operation: Operation) -> Error {
    Error::request_failed(
        operation,
        RequestFailure::Status {
            status: 503,
            message: "service unavailable".into(),
        },
    )
}

#[async_trait]
impl TravelBackend for ScriptedBackend {
    fn base_url(&self) -> &str {
        BACKEND_URL
    }

    async fn send_chat_message(&self, messages: &[ChatMessage]) -> Result<String> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        self.wait_at_gate().await;
        self.chat_reply
            .clone()
            .ok_or_else(|| unavailable(Operation::Chat))
    }

    async fn generate_itinerary(&self, params: &SearchParams) -> Result<Vec<ItineraryDay>> {
        self.itinerary_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(params.clone());
        self.wait_at_gate().await;
        self.itinerary
            .clone()
            .ok_or_else(|| unavailable(Operation::GenerateItinerary))
    }

    async fn search_destinations(&self, _params: &SearchParams) -> Result<SearchResults> {
        Ok(SearchResults::default())
    }

    async fn get_destination_details(&self, _id: &str) -> Result<Destination> {
        Err(unavailable(Operation::DestinationDetails))
    }
}

pub fn ahmedabad_day() -> ItineraryDay {
    ItineraryDay {
        day: 1,
        title: "Ahmedabad".into(),
        description: "Sabarmati Ashram and the old city pols".into(),
    }
}

/// Test server wired to `backend`.
pub fn test_server(backend: Arc<ScriptedBackend>) -> TestServer {
    let sessions = SessionStore::new(backend.base_url());
    let state = AppState { backend, sessions };
    TestServer::new(router(state)).expect("test server")
}

/// Pull the session id out of a rendered page or fragment.
pub fn session_id(html: &str) -> String {
    let marker = r#"name="session_id" value=""#;
    let start = html.find(marker).expect("session id field") + marker.len();
    let end = html[start..].find('"').expect("closing quote") + start;
    html[start..end].to_string()
}
