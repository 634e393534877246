//! In-memory backend for widget tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::{
    ChatMessage, Destination, Error, ItineraryDay, Operation, RequestFailure, Result,
    SearchParams, SearchResults, TravelBackend,
};

#[derive(Debug, Default)]
pub(crate) struct FakeBackend {
    chat_reply: Option<String>,
    itinerary: Option<Vec<ItineraryDay>>,
    chat_calls: AtomicUsize,
    itinerary_calls: AtomicUsize,
    last_messages: Mutex<Vec<ChatMessage>>,
}

impl FakeBackend {
    pub(crate) fn replying(reply: &str) -> Self {
        Self {
            chat_reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self::default()
    }

    pub(crate) fn with_itinerary(mut self, days: Vec<ItineraryDay>) -> Self {
        self.itinerary = Some(days);
        self
    }

    pub(crate) fn chat_calls(&self) -> usize {
        self.chat_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn itinerary_calls(&self) -> usize {
        self.itinerary_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_messages(&self) -> Vec<ChatMessage> {
        self.last_messages.lock().unwrap().clone()
    }
}

fn unavailable(op: Operation) -> Error {
    Error::request_failed(
        op,
        RequestFailure::Status {
            status: 502,
            message: "backend unavailable".into(),
        },
    )
}

#[async_trait]
impl TravelBackend for FakeBackend {
    fn base_url(&self) -> &str {
        "http://localhost:5000"
    }

    async fn send_chat_message(&self, messages: &[ChatMessage]) -> Result<String> {
        self.chat_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = messages.to_vec();
        self.chat_reply
            .clone()
            .ok_or_else(|| unavailable(Operation::Chat))
    }

    async fn generate_itinerary(&self, _params: &SearchParams) -> Result<Vec<ItineraryDay>> {
        self.itinerary_calls.fetch_add(1, Ordering::SeqCst);
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
