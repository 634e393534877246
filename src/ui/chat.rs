//! Chat panel fragment.

use std::fmt::Write;

use crate::api::Role;
use crate::widgets::chat::{DeliveryStatus, TranscriptEntry};
use crate::widgets::{ChatWidget, QUICK_ACTIONS};

use super::{OOB, escape};

/// Loader trigger once the reply request is already with the backend.
const RESULT_POLL_TRIGGER: &str = "every 2s";

/// Render `#chat-panel` for the given session.
///
/// While the widget is sending, the panel carries a loader that immediately
/// posts to `/chat/reply`, so the optimistic user message is on screen before
/// the backend answers.
#[must_use]
pub fn chat_panel(session_id: &str, chat: &ChatWidget) -> String {
    render(session_id, chat, "")
}

/// `#chat-panel` as an out-of-band swap, for responses aimed at another target.
#[must_use]
pub fn chat_panel_oob(session_id: &str, chat: &ChatWidget) -> String {
    render(session_id, chat, OOB)
}

fn render(session_id: &str, chat: &ChatWidget, swap: &str) -> String {
    let sid = escape(session_id);
    let sending = chat.is_sending();

    let mut messages = String::new();
    for (index, entry) in chat.transcript().iter().enumerate() {
        messages.push_str(&message_bubble(index, entry));
    }
    if sending {
        // Only the first render fires the request; later renders poll for the result.
        let trigger = if chat.awaiting_dispatch() {
            "load"
        } else {
            RESULT_POLL_TRIGGER
        };
        let _ = write!(
            messages,
            r##"
            <div class="msg msg-assistant msg-loading" aria-busy="true"
                 hx-post="/chat/reply" hx-trigger="{trigger}"
                 hx-vals='{{"session_id": "{sid}"}}'
                 hx-target="#chat-panel" hx-swap="outerHTML">
                <span class="spinner" aria-label="Assistant is typing"></span>
            </div>"##
        );
    }

    let quick_actions = if chat.quick_actions_visible() {
        let mut buttons = String::new();
        for (index, action) in QUICK_ACTIONS.iter().enumerate() {
            let _ = write!(
                buttons,
                r##"
                <button type="button" class="quick-action"
                        hx-post="/chat/quick-action"
                        hx-vals='{{"session_id": "{sid}", "index": "{index}"}}'
                        hx-target="#chat-panel" hx-swap="outerHTML">{label}</button>"##,
                label = escape(action.label),
            );
        }
        format!(r#"<div class="quick-actions">{buttons}</div>"#)
    } else {
        String::new()
    };

    let disabled = if sending { " disabled" } else { "" };

    format!(
        r##"<section id="chat-panel" class="chat-panel" data-phase="{phase}"{swap}>
    <header class="chat-header">
        <h3>AI Travel Assistant</h3>
        <p>Your personal Gujarat guide</p>
    </header>
    <div id="chat-messages" class="chat-messages" data-scroll-anchor="msg-{anchor}">{messages}
        {quick_actions}
    </div>
    <form class="chat-input" hx-post="/chat/send" hx-target="#chat-panel" hx-swap="outerHTML">
        <input type="hidden" name="session_id" value="{sid}">
        <input type="text" name="message" value="{input}" autocomplete="off"
               placeholder="Ask me anything about Gujarat..."{disabled}>
        <button type="submit" aria-label="Send"{disabled}>Send</button>
    </form>
</section>"##,
        phase = if sending { "sending" } else { "idle" },
        anchor = chat.scroll_anchor(),
        input = escape(chat.input()),
    )
}

fn message_bubble(index: usize, entry: &TranscriptEntry) -> String {
    let role = match entry.message().role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };
    let status = match entry.status() {
        DeliveryStatus::Pending => "pending",
        DeliveryStatus::Delivered => "delivered",
        DeliveryStatus::Unanswered => "unanswered",
    };
    format!(
        r#"
        <div id="msg-{index}" class="msg msg-{role}" data-status="{status}">
            <p>{content}</p>
        </div>"#,
        content = escape(&entry.message().content),
    )
}
