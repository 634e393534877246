//! AI travel assistant chat widget.

use tracing::{info, warn};

use crate::api::{self, ChatMessage, TravelBackend};

use super::{Notification, Rejection};

/// First assistant message of every transcript.
pub const GREETING: &str = "Hello! I'm your Gujarat travel assistant. I can help you plan your trip, \
suggest destinations, create itineraries, and answer any questions about Gujarat. \
What would you like to explore?";

/// A preset question offered before the conversation starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    /// Button label.
    pub label: &'static str,
    /// Text placed in the input when selected.
    pub prompt: &'static str,
}

/// Presets shown under the greeting.
pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "Plan An Adventure Trip",
        prompt: "Plan an adventure trip for 5 days",
    },
    QuickAction {
        label: "Dive Deeper In Culture",
        prompt: "Tell me about Gujarat's culture and traditions",
    },
    QuickAction {
        label: "Top 10 Must-See Spots",
        prompt: "What are the top 10 must-see spots in Gujarat?",
    },
    QuickAction {
        label: "Best Restaurants",
        prompt: "Recommend the best restaurants in Gujarat",
    },
];

/// Delivery state of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Sent, reply not yet received.
    Pending,
    /// Part of a completed exchange.
    Delivered,
    /// The backend never produced a reply for it.
    Unanswered,
}

/// A message in the transcript together with its delivery status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    message: ChatMessage,
    status: DeliveryStatus,
}

impl TranscriptEntry {
    /// The message itself. Never changes once appended.
    #[must_use]
    pub fn message(&self) -> &ChatMessage {
        &self.message
    }

    /// Current delivery status.
    #[must_use]
    pub fn status(&self) -> DeliveryStatus {
        self.status
    }
}

/// Chat widget phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChatPhase {
    /// Ready for input.
    #[default]
    Idle,
    /// Waiting on the backend.
    Sending,
}

/// A submitted message waiting for the assistant's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingReply {
    entry: usize,
    messages: Vec<ChatMessage>,
}

impl PendingReply {
    /// Conversation context to send, oldest first, ending with the new message.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Chat widget state.
///
/// A send goes through three steps:
///
/// 1. [`submit`](Self::submit) appends the user message optimistically and
///    enters [`ChatPhase::Sending`].
/// 2. [`dispatch`](Self::dispatch) hands out the pending request, once.
/// 3. [`resolve`](Self::resolve) applies the backend outcome and returns to
///    [`ChatPhase::Idle`].
///
/// Splitting the steps lets a caller release any lock around the widget while
/// the backend call is outstanding. [`send`](Self::send) runs all three.
#[derive(Debug, Clone)]
pub struct ChatWidget {
    transcript: Vec<TranscriptEntry>,
    input: String,
    phase: ChatPhase,
    outbound: Option<PendingReply>,
    backend_url: String,
}

impl ChatWidget {
    /// Create a widget whose transcript holds only the greeting.
    #[must_use]
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            transcript: vec![TranscriptEntry {
                message: ChatMessage::assistant(GREETING),
                status: DeliveryStatus::Delivered,
            }],
            input: String::new(),
            phase: ChatPhase::Idle,
            outbound: None,
            backend_url: backend_url.into(),
        }
    }

    /// Transcript entries, oldest first.
    #[must_use]
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Current contents of the input field.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> ChatPhase {
        self.phase
    }

    /// Whether a backend call is outstanding.
    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.phase == ChatPhase::Sending
    }

    /// Whether a submitted request is still waiting for [`dispatch`](Self::dispatch).
    #[must_use]
    pub fn awaiting_dispatch(&self) -> bool {
        self.outbound.is_some()
    }

    /// Index of the entry the view should scroll to.
    #[must_use]
    pub fn scroll_anchor(&self) -> usize {
        self.transcript.len().saturating_sub(1)
    }

    /// Quick actions are offered only before the first exchange.
    #[must_use]
    pub fn quick_actions_visible(&self) -> bool {
        self.transcript.len() == 1
    }

    /// Replace the input text. Ignored while sending.
    pub fn set_input(&mut self, value: impl Into<String>) -> bool {
        if self.is_sending() {
            return false;
        }
        self.input = value.into();
        true
    }

    /// Put a preset question in the input without submitting it.
    pub fn apply_quick_action(&mut self, index: usize) -> bool {
        if !self.quick_actions_visible() {
            return false;
        }
        match QUICK_ACTIONS.get(index) {
            Some(action) => self.set_input(action.prompt),
            None => false,
        }
    }

    /// Submit the current input.
    ///
    /// On success the trimmed input is appended as a pending user message, the
    /// input is cleared and the widget enters [`ChatPhase::Sending`].
    pub fn submit(&mut self) -> Result<(), Rejection> {
        if self.is_sending() {
            return Err(Rejection::Busy);
        }
        let content = self.input.trim();
        if content.is_empty() {
            return Err(Rejection::EmptyInput);
        }

        let message = ChatMessage::user(content);
        self.input.clear();
        self.transcript.push(TranscriptEntry {
            message,
            status: DeliveryStatus::Pending,
        });
        self.outbound = Some(PendingReply {
            entry: self.transcript.len() - 1,
            messages: self.transcript.iter().map(|e| e.message.clone()).collect(),
        });
        self.phase = ChatPhase::Sending;
        Ok(())
    }

    /// Take the pending request for sending. Returns `None` when nothing is
    /// waiting or it has already been dispatched.
    pub fn dispatch(&mut self) -> Option<PendingReply> {
        self.outbound.take()
    }

    /// Apply the backend outcome for `reply`.
    ///
    /// A non-blank reply is appended as an assistant message. A blank reply or
    /// a failure appends nothing and yields an error notification.
    pub fn resolve(
        &mut self,
        reply: PendingReply,
        outcome: api::Result<String>,
    ) -> Option<Notification> {
        if !self.is_sending() {
            return None;
        }
        self.phase = ChatPhase::Idle;

        let answer = match outcome {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!(name: "chat.reply.empty", "Backend returned an empty chat reply");
                None
            }
            Err(e) => {
                warn!(name: "chat.reply.failed", error = %e, "Chat request failed");
                None
            }
        };

        let status = if answer.is_some() {
            DeliveryStatus::Delivered
        } else {
            DeliveryStatus::Unanswered
        };
        if let Some(entry) = self.transcript.get_mut(reply.entry) {
            entry.status = status;
        }

        match answer {
            Some(text) => {
                info!(name: "chat.reply.received", chars = text.len(), "Assistant replied");
                self.transcript.push(TranscriptEntry {
                    message: ChatMessage::assistant(text),
                    status: DeliveryStatus::Delivered,
                });
                None
            }
            None => Some(Notification::chat_unavailable(&self.backend_url)),
        }
    }

    /// Submit the input, call the backend and apply the outcome.
    pub async fn send(
        &mut self,
        backend: &dyn TravelBackend,
    ) -> Result<Option<Notification>, Rejection> {
        self.submit()?;
        let Some(reply) = self.dispatch() else {
            return Err(Rejection::Busy);
        };
        let outcome = backend.send_chat_message(reply.messages()).await;
        Ok(self.resolve(reply, outcome))
    }
}
