//! Identity collaborator.
//!
//! Sign-in itself happens outside this client. What the client consumes is a
//! stored session: the signed-in user's claims plus an access token for the
//! fundraising API. Every API call asks the [`IdentityProvider`] for a token
//! immediately before it is sent; tokens are never held across calls.

pub mod error;
pub mod session;
pub mod storage;

pub use error::{AuthError, Result};
pub use session::{SessionIdentity, StoredSession};
pub use storage::{MemorySessionStorage, SessionStorage};

#[cfg(feature = "keyring")]
pub use storage::keyring::KeyringSessionStorage;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Claims about the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub family_name: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
}

impl UserInfo {
    /// "Given Family", trimmed when either part is missing.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.given_name.as_deref().unwrap_or_default(),
            self.family_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }
}

/// Parameters for requesting an access token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenOptions {
    pub audience: Option<String>,
    pub scope: Option<String>,
}

/// Source of the current user and access tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Claims of the signed-in user.
    async fn current_user(&self) -> Result<UserInfo>;

    /// A currently valid access token for `options`.
    async fn access_token(&self, options: &TokenOptions) -> Result<String>;

    /// Forget the stored session. Signing out twice is not an error.
    async fn sign_out(&self) -> Result<()>;
}
