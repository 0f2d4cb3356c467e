//! Session-backed identity provider.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{AuthError, Result};
use super::storage::SessionStorage;
use super::{IdentityProvider, TokenOptions, UserInfo};

/// Environment variable holding a JSON [`StoredSession`] to import at start-up.
pub const SESSION_ENV_VAR: &str = "FUNDRAFFLE_SESSION";

/// A signed-in session as issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub audience: Option<String>,
    pub user: UserInfo,
}

impl StoredSession {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// Identity provider that reads the session from storage on every call.
pub struct SessionIdentity<S: SessionStorage> {
    storage: Arc<S>,
}

impl<S: SessionStorage> SessionIdentity<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self { storage }
    }

    async fn session(&self) -> Result<StoredSession> {
        self.storage
            .load()
            .await?
            .ok_or(AuthError::NotAuthenticated)
    }

    /// Save the session found in [`SESSION_ENV_VAR`], if any.
    ///
    /// Returns whether a session was imported.
    pub async fn import_from_env(&self) -> Result<bool> {
        let Ok(raw) = std::env::var(SESSION_ENV_VAR) else {
            return Ok(false);
        };
        let session: StoredSession = serde_json::from_str(&raw)?;
        self.storage.save(&session).await?;
        log::info!(
            "Imported session for {} into {} storage",
            session.user.email,
            self.storage.name()
        );
        Ok(true)
    }
}

#[async_trait]
impl<S: SessionStorage + 'static> IdentityProvider for SessionIdentity<S> {
    async fn current_user(&self) -> Result<UserInfo> {
        Ok(self.session().await?.user)
    }

    async fn access_token(&self, options: &TokenOptions) -> Result<String> {
        let session = self.session().await?;

        if session.is_expired(Utc::now()) {
            return Err(AuthError::TokenExpired);
        }

        if let (Some(requested), Some(stored)) = (&options.audience, &session.audience) {
            if requested != stored {
                return Err(AuthError::AudienceMismatch {
                    requested: requested.clone(),
                    stored: stored.clone(),
                });
            }
        }

        Ok(session.access_token)
    }

    async fn sign_out(&self) -> Result<()> {
        self.storage.remove().await?;
        log::info!("Signed out, session removed from {} storage", self.storage.name());
        Ok(())
    }
}
