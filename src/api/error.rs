//! Error types for the fundraising API client.

use thiserror::Error;

use crate::auth::AuthError;

/// Result type alias for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Message used when a success response does not have the expected shape.
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response format from the server.";

/// Errors that can occur talking to the fundraising API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No credential could be obtained for the call.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("Request failed with status code {status}")]
    Server {
        status: u16,
        /// `message` field of the error body, when the server sent one.
        message: Option<String>,
    },

    /// A success response whose body did not match the expected shape.
    #[error("{}", UNEXPECTED_RESPONSE)]
    UnexpectedResponse,

    /// The configured base URL or endpoint path is invalid.
    #[error("Invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    /// The server-provided message, if the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server {
                message: Some(message),
                ..
            } if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Best-effort text for a user-facing notification: the server's own
    /// message when present, otherwise this error's description.
    pub fn user_message(&self) -> String {
        self.server_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    /// Returns true if this error indicates the user must sign in again.
    #[must_use]
    pub fn needs_auth(&self) -> bool {
        match self {
            Self::Auth(e) => e.needs_auth(),
            Self::Server { status, .. } => *status == 401,
            _ => false,
        }
    }
}
