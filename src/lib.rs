//! Gujarat Travel Planner
//!
//! Landing page for an AI travel-planning product: a hero search bar that asks
//! a remote backend for a day-by-day itinerary, and a chat assistant backed by
//! the same service. All planning intelligence lives in the backend; this
//! crate is the typed client, the widget state machines and the HTML-first
//! web server that hosts them.
//!
//! # Architecture
//!
//! - **Server**: Axum + HTMX, each widget re-rendered as an HTML fragment per request
//! - **Widgets**: Explicit state machines with a single in-flight backend call
//! - **API client**: One-shot reqwest calls, no retries, no caching
//!
//! # Modules
//!
//! - [`api`]: Backend wire types, HTTP client and the [`api::TravelBackend`] seam
//! - [`config`]: Layered configuration
//! - [`session`]: Per-visitor widget state
//! - [`ui`]: HTML fragments
//! - [`widgets`]: Chat and search state machines

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::implicit_hasher)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod config;
pub mod server;
pub mod session;
pub mod ui;
pub mod widgets;

use crate::api::TravelBackend;

use session::SessionStore;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Travel backend the widgets call.
    pub backend: Arc<dyn TravelBackend>,
    /// Session store for per-visitor widgets.
    pub sessions: SessionStore,
}
