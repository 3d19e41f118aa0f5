//! Error types for the backend API client.

use thiserror::Error;

/// Errors produced by the request proxy.
///
/// Every backend interaction funnels into this one shape so callers can
/// tell "the server answered and said no" apart from "the server never
/// answered" without inspecting transport details.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, or a status-derived
        /// fallback when the body carried none.
        message: String,
    },

    /// The request was sent but no response arrived within the timeout.
    #[error("request timed out")]
    Timeout,

    /// The backend could not be reached at all.
    #[error("connection error: {0}")]
    Connection(#[source] reqwest::Error),

    /// A success response carried a body the expected type cannot represent.
    #[error("unexpected response shape: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ApiError {
    /// Returns `true` for failures where the backend never produced an
    /// answer. These are the cases worth following up with a health probe
    /// and "server offline" messaging.
    #[must_use]
    pub const fn is_connectivity(&self) -> bool {
        matches!(self, Self::Timeout | Self::Connection(_))
    }

    /// Classify a transport-level failure from reqwest.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Connection(err)
        }
    }
}

/// Error body shape used by the backend. Most endpoints use `message`;
/// a few older ones use `error`.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    /// Best available human-readable message, `message` taking precedence.
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::Api {
            status: 401,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "API error (401): Invalid credentials");

        assert_eq!(ApiError::Timeout.to_string(), "request timed out");
    }

    #[test]
    fn test_is_connectivity() {
        assert!(ApiError::Timeout.is_connectivity());

        let api = ApiError::Api {
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!api.is_connectivity());
    }

    #[test]
    fn test_error_body_prefers_message_over_error() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message": "Cart is empty", "error": "legacy"}"#)
                .expect("deserialize");
        assert_eq!(body.into_message().as_deref(), Some("Cart is empty"));
    }

    #[test]
    fn test_error_body_falls_back_to_error_field() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error": "Product not found"}"#).expect("deserialize");
        assert_eq!(body.into_message().as_deref(), Some("Product not found"));
    }

    #[test]
    fn test_error_body_with_neither_field_is_empty() {
        let body: ErrorBody = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(body.into_message(), None);
    }
}
