//! System keyring session storage (feature-gated).
//!
//! Stores the signed-in session in the platform credential store:
//! - macOS: Keychain
//! - Linux: Secret Service (GNOME Keyring, KWallet)
//! - Windows: Credential Manager
//!
//! The session is serialized to JSON under service `fundraffle`.

use async_trait::async_trait;
use keyring::Entry;
use std::sync::OnceLock;
use tracing::instrument;

use super::SessionStorage;
use crate::auth::error::{AuthError, Result};
use crate::auth::session::StoredSession;

/// Service name used for keyring entries.
const SERVICE_NAME: &str = "fundraffle";

/// Cached keyring availability status.
static KEYRING_AVAILABLE: OnceLock<bool> = OnceLock::new();

/// Keyring-backed session storage.
#[derive(Debug, Clone)]
pub struct KeyringSessionStorage {
    /// Account name for the keyring entry.
    account: String,
}

impl Default for KeyringSessionStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyringSessionStorage {
    /// Storage under the default account name "session".
    pub fn new() -> Self {
        Self {
            account: "session".to_string(),
        }
    }

    /// Check if the system keyring is usable. The probe runs once per process.
    pub fn is_available() -> bool {
        *KEYRING_AVAILABLE.get_or_init(Self::check_availability)
    }

    fn check_availability() -> bool {
        match Entry::new("fundraffle-test", "availability-check") {
            Ok(entry) => match entry.get_password() {
                Ok(_) => true,
                Err(keyring::Error::NoEntry) => true,
                Err(keyring::Error::NoStorageAccess(_)) => false,
                Err(keyring::Error::PlatformFailure(_)) => false,
                Err(_) => true,
            },
            Err(_) => false,
        }
    }

    fn entry(&self) -> Result<Entry> {
        Entry::new(SERVICE_NAME, &self.account)
            .map_err(|e| AuthError::storage(format!("Failed to create keyring entry: {}", e)))
    }
}

#[async_trait]
impl SessionStorage for KeyringSessionStorage {
    #[instrument(skip(self))]
    async fn load(&self) -> Result<Option<StoredSession>> {
        let entry = self.entry()?;

        let result = tokio::task::spawn_blocking(move || entry.get_password())
            .await
            .map_err(|e| AuthError::storage(format!("Keyring task failed: {}", e)))?;

        match result {
            Ok(json) => {
                let session: StoredSession = serde_json::from_str(&json).map_err(|e| {
                    AuthError::storage(format!("Failed to parse session from keyring: {}", e))
                })?;
                Ok(Some(session))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(AuthError::from(e)),
        }
    }

    #[instrument(skip(self, session))]
    async fn save(&self, session: &StoredSession) -> Result<()> {
        let entry = self.entry()?;
        let json = serde_json::to_string(session)?;

        tokio::task::spawn_blocking(move || entry.set_password(&json))
            .await
            .map_err(|e| AuthError::storage(format!("Keyring task failed: {}", e)))??;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove(&self) -> Result<()> {
        let entry = self.entry()?;

        let result = tokio::task::spawn_blocking(move || entry.delete_password())
            .await
            .map_err(|e| AuthError::storage(format!("Keyring task failed: {}", e)))?;

        match result {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(AuthError::from(e)),
        }
    }

    fn name(&self) -> &str {
        "keyring"
    }
}
