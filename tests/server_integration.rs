//! End-to-end widget flows through the HTMX endpoints.

mod common;

use std::sync::Arc;

use common::{BACKEND_URL, Gate, ScriptedBackend, ahmedabad_day, session_id, test_server};
use gujarat_travel_planner::api::Role;

#[tokio::test]
async fn test_landing_page_renders_greeting_and_quick_actions() {
    let server = test_server(Arc::new(ScriptedBackend::down()));

    let response = server.get("/").await;
    response.assert_status_ok();
    let html = response.text();

    assert!(html.contains("Gujarat travel assistant"));
    assert!(html.contains("Plan An Adventure Trip"));
    assert!(html.contains("Best Restaurants"));
    assert!(html.contains(r#"id="search-section""#));
    assert!(!session_id(&html).is_empty());
}

#[tokio::test]
async fn test_each_visit_gets_its_own_session() {
    let server = test_server(Arc::new(ScriptedBackend::down()));

    let first = session_id(&server.get("/").await.text());
    let second = session_id(&server.get("/").await.text());

    assert_ne!(first, second);
}

#[tokio::test]
async fn test_chat_round_trip() {
    let backend = Arc::new(ScriptedBackend::replying("Visit the Rann of Kutch in winter."));
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    let sent = server
        .post("/chat/send")
        .form(&[("session_id", sid.as_str()), ("message", "  When is Rann Utsav?  ")])
        .await
        .text();

    // Optimistic: user message shown, loader armed, no backend call yet
    assert!(sent.contains("When is Rann Utsav?"));
    assert!(sent.contains(r#"data-status="pending""#));
    assert!(sent.contains(r#"hx-post="/chat/reply""#));
    assert!(!sent.contains("Plan An Adventure Trip"));
    assert_eq!(backend.chat_calls(), 0);

    let replied = server
        .post("/chat/reply")
        .form(&[("session_id", sid.as_str())])
        .await
        .text();

    assert!(replied.contains("Visit the Rann of Kutch in winter."));
    assert!(replied.contains(r#"id="msg-2""#));
    assert!(replied.contains(r#"data-scroll-anchor="msg-2""#));
    assert!(!replied.contains(r#"hx-post="/chat/reply""#));
    assert!(!replied.contains("toast-title"));

    let sent_messages = backend.last_messages();
    assert_eq!(sent_messages.len(), 2);
    assert_eq!(sent_messages[0].role, Role::Assistant);
    assert_eq!(sent_messages[1].role, Role::User);
    assert_eq!(sent_messages[1].content, "When is Rann Utsav?");
}

#[tokio::test]
async fn test_blank_chat_message_is_ignored() {
    let backend = Arc::new(ScriptedBackend::replying("unused"));
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    let html = server
        .post("/chat/send")
        .form(&[("session_id", sid.as_str()), ("message", "   ")])
        .await
        .text();

    assert!(!html.contains(r#"id="msg-1""#));
    assert!(!html.contains("/chat/reply"));
    assert_eq!(backend.chat_calls(), 0);
}

#[tokio::test]
async fn test_duplicate_sends_make_one_backend_call() {
    let backend = Arc::new(ScriptedBackend::replying("Try Gir National Park."));
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    server
        .post("/chat/send")
        .form(&[("session_id", sid.as_str()), ("message", "Wildlife?")])
        .await
        .assert_status_ok();
    let second = server
        .post("/chat/send")
        .form(&[("session_id", sid.as_str()), ("message", "Wildlife again?")])
        .await
        .text();
    assert!(!second.contains("Wildlife again?"));

    for _ in 0..2 {
        server
            .post("/chat/reply")
            .form(&[("session_id", sid.as_str())])
            .await
            .assert_status_ok();
    }

    assert_eq!(backend.chat_calls(), 1);
    let html = server
        .post("/chat/quick-action")
        .form(&[("session_id", sid.as_str()), ("index", "0")])
        .await
        .text();
    assert!(html.contains("Try Gir National Park."));
    assert!(!html.contains(r#"id="msg-3""#));
}

#[tokio::test]
async fn test_concurrent_reply_triggers_dispatch_once() {
    let gate = Arc::new(Gate::default());
    let backend = Arc::new(ScriptedBackend::replying("Somnath at sunset.").gated(Arc::clone(&gate)));
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    server
        .post("/chat/send")
        .form(&[("session_id", sid.as_str()), ("message", "Temples?")])
        .await
        .assert_status_ok();

    let first = async {
        server
            .post("/chat/reply")
            .form(&[("session_id", sid.as_str())])
            .await
    };
    let (first, second) = tokio::join!(first, async {
        gate.entered.notified().await;
        let second = server
            .post("/chat/reply")
            .form(&[("session_id", sid.as_str())])
            .await
            .text();
        gate.release.notify_one();
        second
    });

    // The late trigger sees the loader, not a second request
    assert!(second.contains(r#"data-phase="sending""#));
    assert!(first.text().contains("Somnath at sunset."));
    assert_eq!(backend.chat_calls(), 1);
}

#[tokio::test]
async fn test_chat_failure_shows_backend_url() {
    let backend = Arc::new(ScriptedBackend::down());
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    server
        .post("/chat/send")
        .form(&[("session_id", sid.as_str()), ("message", "Hello?")])
        .await
        .assert_status_ok();
    let html = server
        .post("/chat/reply")
        .form(&[("session_id", sid.as_str())])
        .await
        .text();

    assert!(html.contains("toast-destructive"));
    assert!(html.contains(&format!(
        "Make sure your travel backend is running at {BACKEND_URL}"
    )));
    assert!(html.contains(r#"data-status="unanswered""#));
    assert!(!html.contains(r#"id="msg-2""#));
    // Input is usable again
    assert!(html.contains(r#"data-phase="idle""#));
}

#[tokio::test]
async fn test_quick_action_fills_input_without_sending() {
    let backend = Arc::new(ScriptedBackend::replying("unused"));
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    let html = server
        .post("/chat/quick-action")
        .form(&[("session_id", sid.as_str()), ("index", "2")])
        .await
        .text();

    assert!(html.contains(r#"value="What are the top 10 must-see spots in Gujarat?""#));
    assert!(!html.contains(r#"id="msg-1""#));
    assert_eq!(backend.chat_calls(), 0);
}

#[tokio::test]
async fn test_plan_without_destination_or_activity_is_rejected() {
    let backend = Arc::new(ScriptedBackend::down().with_itinerary(vec![ahmedabad_day()]));
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    let html = server
        .post("/plan")
        .form(&[
            ("session_id", sid.as_str()),
            ("destination", "  "),
            ("activity", ""),
            ("date", "December"),
            ("budget", "20000"),
        ])
        .await
        .text();

    assert!(html.contains("Missing information"));
    assert!(html.contains("Please enter at least a destination or activity"));
    assert!(!html.contains("toast-destructive"));
    assert_eq!(backend.itinerary_calls(), 0);
}

#[tokio::test]
async fn test_plan_shows_itinerary_modal() {
    let backend = Arc::new(ScriptedBackend::down().with_itinerary(vec![ahmedabad_day()]));
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    let html = server
        .post("/plan")
        .form(&[
            ("session_id", sid.as_str()),
            ("destination", "Ahmedabad"),
            ("activity", ""),
            ("date", ""),
            ("budget", ""),
        ])
        .await
        .text();

    assert!(html.contains(r#"role="dialog""#));
    assert!(html.contains("Day 1: Ahmedabad"));
    assert!(html.contains(r#"value="Ahmedabad""#));

    let params = backend.last_params().expect("itinerary requested");
    assert_eq!(params.destination.as_deref(), Some("Ahmedabad"));
    assert_eq!(params.activity, None);

    let dismissed = server
        .post("/plan/dismiss")
        .form(&[("session_id", sid.as_str())])
        .await
        .text();
    assert!(!dismissed.contains(r#"role="dialog""#));
    assert!(dismissed.contains(r#"value="Ahmedabad""#));
}

#[tokio::test]
async fn test_plan_failure_shows_error_toast() {
    let backend = Arc::new(ScriptedBackend::down());
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    let html = server
        .post("/plan")
        .form(&[("session_id", sid.as_str()), ("activity", "Garba")])
        .await
        .text();

    assert!(html.contains("Failed to generate itinerary"));
    assert!(!html.contains(r#"role="dialog""#));
    assert_eq!(backend.itinerary_calls(), 1);
}

#[tokio::test]
async fn test_plan_while_loading_makes_no_second_request() {
    let gate = Arc::new(Gate::default());
    let backend = Arc::new(
        ScriptedBackend::down()
            .with_itinerary(vec![ahmedabad_day()])
            .gated(Arc::clone(&gate)),
    );
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    let first = async {
        server
            .post("/plan")
            .form(&[("session_id", sid.as_str()), ("destination", "Ahmedabad")])
            .await
    };
    let (first, second) = tokio::join!(first, async {
        gate.entered.notified().await;
        let second = server
            .post("/plan")
            .form(&[("session_id", sid.as_str()), ("destination", "Bhuj")])
            .await
            .text();
        gate.release.notify_one();
        second
    });

    assert!(second.contains(" disabled>Plan My Adventure"));
    assert!(!second.contains("Bhuj"));
    assert!(first.text().contains("Day 1: Ahmedabad"));
    assert_eq!(backend.itinerary_calls(), 1);
}

#[tokio::test]
async fn test_unknown_session_gets_a_fresh_one() {
    let server = test_server(Arc::new(ScriptedBackend::down()));

    let html = server
        .post("/chat/quick-action")
        .form(&[("session_id", "not-a-session"), ("index", "0")])
        .await
        .text();

    let sid = session_id(&html);
    assert_ne!(sid, "not-a-session");
    assert!(html.contains("Plan an adventure trip for 5 days"));
}

#[tokio::test]
async fn test_healthz_reports_sessions() {
    let server = test_server(Arc::new(ScriptedBackend::down()));
    server.get("/").await.assert_status_ok();

    let body: serde_json::Value = server.get("/healthz").await.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["sessions"], 1);
}

#[tokio::test]
async fn test_late_reply_triggers_poll_instead_of_refiring() {
    let gate = Arc::new(Gate::default());
    let backend = Arc::new(
        ScriptedBackend::replying("Modhera at dawn.").gated(Arc::clone(&gate)),
    );
    let server = test_server(Arc::clone(&backend));
    let sid = session_id(&server.get("/").await.text());

    let sent = server
        .post("/chat/send")
        .form(&[("session_id", sid.as_str()), ("message", "Sun temple?")])
        .await
        .text();
    assert!(sent.contains(r#"hx-trigger="load""#));

    let first = async {
        server
            .post("/chat/reply")
            .form(&[("session_id", sid.as_str())])
            .await
    };
    let (first, late) = tokio::join!(first, async {
        gate.entered.notified().await;
        let mut late = Vec::new();
        for _ in 0..3 {
            late.push(
                server
                    .post("/chat/reply")
                    .form(&[("session_id", sid.as_str())])
                    .await
                    .text(),
            );
        }
        late.push(
            server
                .post("/chat/send")
                .form(&[("session_id", sid.as_str()), ("message", "Again?")])
                .await
                .text(),
        );
        gate.release.notify_one();
        late
    });

    for html in &late {
        assert!(html.contains(r#"data-phase="sending""#));
        assert!(!html.contains(r#"hx-trigger="load""#));
        assert!(html.contains(r#"hx-trigger="every 2s""#));
    }
    assert!(first.text().contains("Modhera at dawn."));
    assert_eq!(backend.chat_calls(), 1);

    // Once resolved, a poll gets the final panel without a loader
    let settled = server
        .post("/chat/reply")
        .form(&[("session_id", sid.as_str())])
        .await
        .text();
    assert!(settled.contains("Modhera at dawn."));
    assert!(!settled.contains(r#"hx-post="/chat/reply""#));
}

#[tokio::test]
async fn test_replaced_session_refreshes_both_widgets() {
    let backend = Arc::new(
        ScriptedBackend::replying("Kem cho!").with_itinerary(vec![ahmedabad_day()]),
    );
    let server = test_server(Arc::clone(&backend));

    let html = server
        .post("/chat/send")
        .form(&[("session_id", "expired-session"), ("message", "Hi")])
        .await
        .text();

    let sid = session_id(&html);
    assert_ne!(sid, "expired-session");
    assert!(html.contains(r#"id="search-section" class="hero-search" hx-swap-oob="true""#));
    assert_eq!(html.matches(&format!(r#"value="{sid}""#)).count(), 2);

    // Both widgets now post the same id, so no further session is minted
    let planned = server
        .post("/plan")
        .form(&[("session_id", sid.as_str()), ("destination", "Ahmedabad")])
        .await
        .text();
    assert!(planned.contains("Day 1: Ahmedabad"));
    assert!(!planned.contains(r#"id="chat-panel""#));

    let body: serde_json::Value = server.get("/healthz").await.json();
    assert_eq!(body["sessions"], 1);
}
