//! Error types for backend requests.

use serde_json::Value;
use thiserror::Error;

/// Maximum number of characters of a non-JSON error body kept as the message.
pub const MAX_ERROR_TEXT: usize = 200;

/// Errors that can occur while talking to the backend.
///
/// Requests are never retried; every variant is terminal for that attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    /// The request never got a response (DNS, refused connection, timeout, offline).
    #[error("network error: {message}")]
    Network {
        /// Transport-level description.
        message: String,
    },

    /// The request was abandoned because the user navigated away.
    #[error("request cancelled")]
    Cancelled,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the body, or the status text.
        message: String,
        /// Raw response body.
        body: String,
    },

    /// A 2xx body could not be decoded into the expected shape.
    #[error("could not decode response: {0}")]
    Decode(String),

    /// The endpoint needs a signed-in user and no token is stored.
    #[error("not signed in")]
    NotAuthenticated,

    /// Reading or writing the auth store failed.
    #[error("auth storage error: {0}")]
    Storage(String),

    /// The request could not be built (bad base URL, invalid input).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// HTTP status of the failure; `0` when no response was received.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Http { status, .. } => *status,
            _ => 0,
        }
    }

    /// Build the error for a non-2xx response.
    ///
    /// The message is taken from the JSON body's `message`, `detail` or
    /// `error` field. A body that is not JSON (or has none of those fields)
    /// contributes its text, truncated to [`MAX_ERROR_TEXT`] characters; an
    /// empty body falls back to the status text.
    #[must_use]
    pub fn from_response(status: u16, status_text: &str, body: String) -> Self {
        let message = message_from_body(&body, &["message", "detail", "error"])
            .or_else(|| {
                let text = body.trim();
                (!text.is_empty() && serde_json::from_str::<Value>(text).is_err())
                    .then(|| truncate(text, MAX_ERROR_TEXT))
            })
            .or_else(|| (!status_text.is_empty()).then(|| status_text.to_string()))
            .unwrap_or_else(|| format!("request failed with status {status}"));

        Self::Http {
            status,
            message,
            body,
        }
    }

    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network { .. } => {
                "Could not reach Elimu Online. Please check your internet connection."
            }
            Self::Cancelled => "The request was cancelled.",
            Self::Http { status, message, .. } if (400..500).contains(status) => message,
            Self::Http { .. } => "The server ran into a problem. Please try again later.",
            Self::NotAuthenticated => "Please log in first.",
            Self::Decode(_) | Self::Storage(_) | Self::InvalidRequest(_) => {
                "An unexpected error occurred."
            }
        }
    }

    /// Whether resubmitting the same request could succeed.
    ///
    /// Informational only: nothing in this crate retries.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Whether the failure came from the server rather than the transport.
    #[must_use]
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// First non-empty string among `keys` in a JSON object body.
#[must_use]
pub fn message_from_body(body: &str, keys: &[&str]) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let object = value.as_object()?;
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        // DRF validation errors arrive as lists of strings
        Value::Array(items) => items.iter().find_map(|item| item.as_str().map(String::from)),
        _ => None,
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// Result type alias for backend operations.
pub type Result<T> = std::result::Result<T, ApiError>;
