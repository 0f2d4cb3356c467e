//! Error types for the identity collaborator.

use thiserror::Error;

/// Result type alias for identity operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors raised while obtaining the current user or an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    /// No stored session - the user has not signed in.
    #[error("Not authenticated - please sign in first")]
    NotAuthenticated,

    /// The stored access token has expired and must be renewed.
    #[error("Access token expired - please sign in again")]
    TokenExpired,

    /// The stored token was issued for a different API audience.
    #[error("Token audience mismatch: requested {requested}, stored {stored}")]
    AudienceMismatch { requested: String, stored: String },

    /// Storage error (load/save session).
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AuthError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Returns true if this error indicates the user must sign in again.
    #[must_use]
    pub fn needs_auth(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::TokenExpired | Self::AudienceMismatch { .. }
        )
    }
}

#[cfg(feature = "keyring")]
impl From<keyring::Error> for AuthError {
    fn from(err: keyring::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
