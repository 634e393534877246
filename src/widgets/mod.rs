//! Widget state machines.
//!
//! Each widget owns its state exclusively and allows a single backend call in
//! flight. Submissions made while a call is outstanding are rejected without
//! touching the backend.
//!
//! - [`chat`]: AI travel assistant transcript (`idle` / `sending`)
//! - [`search`]: hero search form and itinerary results (`idle` / `loading` / `resultsShown`)
//! - [`notification`]: toasts raised by both

pub mod chat;
pub mod notification;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

pub use chat::{ChatPhase, ChatWidget, DeliveryStatus, PendingReply, QUICK_ACTIONS, QuickAction};
pub use notification::{Notification, NotificationVariant};
pub use search::{SearchField, SearchPhase, SearchWidget};

use thiserror::Error;

/// Why a widget refused a submission.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A request from this widget is still in flight.
    #[error("a request is already in flight")]
    Busy,
    /// Chat input was blank after trimming.
    #[error("message is empty")]
    EmptyInput,
    /// Neither destination nor activity was given.
    #[error("destination or activity required")]
    MissingQuery,
}

impl Rejection {
    /// The notification to show for this rejection, if any.
    ///
    /// Only the search validation failure is surfaced; the others are silent
    /// because the controls are disabled in those states anyway.
    #[must_use]
    pub fn notification(self) -> Option<Notification> {
        match self {
            Self::MissingQuery => Some(Notification::missing_query()),
            Self::Busy | Self::EmptyInput => None,
        }
    }
}
