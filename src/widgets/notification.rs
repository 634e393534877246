//! Toast notifications raised by the widgets.

use serde::Serialize;

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    /// Informational.
    #[default]
    Default,
    /// Something failed.
    Destructive,
}

/// A non-blocking, user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Short headline.
    pub title: String,
    /// Explanation shown under the title.
    pub description: String,
    /// Visual weight.
    pub variant: NotificationVariant,
}

impl Notification {
    /// Informational notification.
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        }
    }

    /// Error notification.
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            description: description.into(),
            variant: NotificationVariant::Destructive,
        }
    }

    /// Chat reply could not be obtained.
    #[must_use]
    pub fn chat_unavailable(backend_url: &str) -> Self {
        Self::error(format!(
            "Failed to get response. Make sure your travel backend is running at {backend_url}"
        ))
    }

    /// Itinerary could not be generated.
    #[must_use]
    pub fn itinerary_unavailable() -> Self {
        Self::error(
            "Failed to generate itinerary. Make sure the travel planning backend is running.",
        )
    }

    /// Search form submitted without a destination or activity.
    #[must_use]
    pub fn missing_query() -> Self {
        Self::info(
            "Missing information",
            "Please enter at least a destination or activity",
        )
    }

    /// Whether this notification reports a failure.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == NotificationVariant::Destructive
    }
}
