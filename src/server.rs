//! HTTP server: landing page and the HTMX endpoints behind both widgets.
//!
//! Handlers only take a session's widget lock for synchronous transitions.
//! Backend calls run in their own task so a visitor navigating away mid-call
//! cannot leave a widget stuck in its busy phase.

use std::sync::Arc;

use axum::{
    Form, Json, Router,
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use crate::AppState;
use crate::api::{ApiClient, TravelBackend};
use crate::config::AppConfig;
use crate::session::{Session, SessionStore};
use crate::ui::{
    self, chat_panel, chat_panel_oob, search_section, search_section_oob, toast_slot,
};
use crate::widgets::{ChatWidget, Notification, SearchField};

/// Start the Axum server with the provided configuration.
pub async fn start_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let client = ApiClient::new(&config.backend.base_url)?;
    info!(
        name: "backend.config.loaded",
        base_url = %client.base_url(),
        "Travel backend configured"
    );

    // Probe in the background: the transport has no timeout and startup must
    // not hang on an unreachable backend.
    let probe = client.clone();
    tokio::spawn(async move {
        match probe.health().await {
            Ok(health) => info!(
                name: "backend.health.ok",
                status = %health.status,
                message = %health.message,
                "Travel backend reachable"
            ),
            Err(e) => warn!(
                name: "backend.health.failed",
                error = %e,
                "Travel backend not reachable; chat and itinerary requests will fail until it is"
            ),
        }
    });

    let backend: Arc<dyn TravelBackend> = Arc::new(client);
    let sessions = SessionStore::with_timeout(backend.base_url(), config.session.timeout());
    let _sweeper = sessions.spawn_sweeper(config.session.sweep_interval());

    let state = AppState { backend, sessions };

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!(
        name: "server.started",
        address = %address,
        "Server started"
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(name: "server.stopped", "Server stopped");
    Ok(())
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/chat/send", post(chat_send))
        .route("/chat/reply", post(chat_reply))
        .route("/chat/quick-action", post(chat_quick_action))
        .route("/plan", post(plan))
        .route("/plan/dismiss", post(plan_dismiss))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(name: "server.signal.failed", error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Forms
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct SessionForm {
    #[serde(default)]
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct ChatSendForm {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct QuickActionForm {
    #[serde(default)]
    session_id: String,
    index: usize,
}

#[derive(Debug, Deserialize)]
struct PlanForm {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    destination: String,
    #[serde(default)]
    activity: String,
    #[serde(default)]
    date: String,
    #[serde(default)]
    budget: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.sessions.create();
    Html(ui::landing_page(&session))
}

/// Render the chat panel. When the request's session was replaced, the search
/// section is swapped out-of-band too so both widgets carry the new id.
fn render_chat(
    session: &Session,
    requested_id: &str,
    note: Option<&Notification>,
) -> Html<String> {
    let panel = session.with_chat(|chat| chat_panel(session.id(), chat));
    let sibling = if session.id() == requested_id {
        String::new()
    } else {
        session.with_search(|search| search_section_oob(session.id(), search))
    };
    Html(format!("{panel}{sibling}{}", toast_slot(note)))
}

/// Render the search section, mirroring [`render_chat`].
fn render_search(
    session: &Session,
    requested_id: &str,
    note: Option<&Notification>,
) -> Html<String> {
    let section = session.with_search(|search| search_section(session.id(), search));
    let sibling = if session.id() == requested_id {
        String::new()
    } else {
        session.with_chat(|chat| chat_panel_oob(session.id(), chat))
    };
    Html(format!("{section}{sibling}{}", toast_slot(note)))
}

async fn chat_send(
    State(state): State<AppState>,
    Form(form): Form<ChatSendForm>,
) -> impl IntoResponse {
    let session = state.sessions.get_or_create(&form.session_id);
    let submitted = session.with_chat(|chat| {
        chat.set_input(form.message);
        chat.submit()
    });
    match submitted {
        Ok(()) => info!(name: "chat.message.submitted", session_id = %session.id(), "Chat message submitted"),
        Err(reason) => debug!(
            name: "chat.message.rejected",
            session_id = %session.id(),
            reason = %reason,
            "Chat submission rejected"
        ),
    }
    render_chat(&session, &form.session_id, None)
}

async fn chat_reply(
    State(state): State<AppState>,
    Form(form): Form<SessionForm>,
) -> impl IntoResponse {
    let session = state.sessions.get_or_create(&form.session_id);
    let Some(reply) = session.with_chat(ChatWidget::dispatch) else {
        // Already dispatched by an earlier trigger; just show current state.
        return render_chat(&session, &form.session_id, None);
    };

    let backend = Arc::clone(&state.backend);
    let task_session = session.clone();
    let note = tokio::spawn(async move {
        let outcome = backend.send_chat_message(reply.messages()).await;
        task_session.with_chat(|chat| chat.resolve(reply, outcome))
    })
    .await
    .unwrap_or_else(|e| {
        error!(name: "chat.reply.task_failed", error = %e, "Chat reply task failed");
        None
    });

    render_chat(&session, &form.session_id, note.as_ref())
}

async fn chat_quick_action(
    State(state): State<AppState>,
    Form(form): Form<QuickActionForm>,
) -> impl IntoResponse {
    let session = state.sessions.get_or_create(&form.session_id);
    session.with_chat(|chat| chat.apply_quick_action(form.index));
    render_chat(&session, &form.session_id, None)
}

async fn plan(State(state): State<AppState>, Form(form): Form<PlanForm>) -> impl IntoResponse {
    let session = state.sessions.get_or_create(&form.session_id);
    let submitted = session.with_search(|search| {
        search.set_field(SearchField::Destination, &form.destination);
        search.set_field(SearchField::Activity, &form.activity);
        search.set_field(SearchField::Date, &form.date);
        search.set_field(SearchField::Budget, &form.budget);
        search.submit()
    });

    let note = match submitted {
        Ok(params) => {
            info!(
                name: "itinerary.requested",
                session_id = %session.id(),
                destination = params.destination.as_deref().unwrap_or_default(),
                activity = params.activity.as_deref().unwrap_or_default(),
                "Itinerary requested"
            );
            let backend = Arc::clone(&state.backend);
            let task_session = session.clone();
            tokio::spawn(async move {
                let outcome = backend.generate_itinerary(&params).await;
                task_session.with_search(|search| search.resolve(outcome))
            })
            .await
            .unwrap_or_else(|e| {
                error!(name: "itinerary.task_failed", error = %e, "Itinerary task failed");
                None
            })
        }
        Err(reason) => {
            debug!(
                name: "itinerary.rejected",
                session_id = %session.id(),
                reason = %reason,
                "Itinerary submission rejected"
            );
            reason.notification()
        }
    };

    render_search(&session, &form.session_id, note.as_ref())
}

async fn plan_dismiss(
    State(state): State<AppState>,
    Form(form): Form<SessionForm>,
) -> impl IntoResponse {
    let session = state.sessions.get_or_create(&form.session_id);
    session.with_search(|search| search.dismiss());
    render_search(&session, &form.session_id, None)
}

async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "sessions": state.sessions.len(),
    }))
}
