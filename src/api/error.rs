//! Error types for the backend API client.

use thiserror::Error;

/// Backend operation a request was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `POST /api/chat`
    Chat,
    /// `POST /api/generate-itinerary`
    GenerateItinerary,
    /// `GET /api/search`
    Search,
    /// `GET /api/destinations/{id}`
    DestinationDetails,
    /// `GET /health`
    Health,
}

impl Operation {
    /// Stable name used in log events.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::GenerateItinerary => "generate_itinerary",
            Self::Search => "search",
            Self::DestinationDetails => "destination_details",
            Self::Health => "health",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API client error type.
#[derive(Error, Debug)]
pub enum Error {
    /// A backend call did not produce a usable result.
    ///
    /// Transport failures, non-2xx statuses, undecodable bodies and empty chat
    /// replies all land here; callers are not expected to tell them apart.
    #[error("{operation} request failed: {cause}")]
    RequestFailed {
        /// The operation that failed.
        operation: Operation,
        /// What went wrong, kept for logging.
        #[source]
        cause: RequestFailure,
    },

    /// The configured base URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Underlying cause of a [`Error::RequestFailed`].
#[derive(Error, Debug)]
pub enum RequestFailure {
    /// Connection, DNS, transport or body decoding failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        message: String,
    },

    /// The backend answered 2xx without the expected payload.
    #[error("empty response")]
    EmptyResponse,
}

impl Error {
    /// Build a request failure for `operation`.
    pub fn request_failed(operation: Operation, cause: impl Into<RequestFailure>) -> Self {
        Self::RequestFailed {
            operation,
            cause: cause.into(),
        }
    }

    /// The HTTP status reported by the backend, if the failure carried one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed {
                cause: RequestFailure::Status { status, .. },
                ..
            } => Some(*status),
            Self::RequestFailed {
                cause: RequestFailure::Http(e),
                ..
            } => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, Error>;
