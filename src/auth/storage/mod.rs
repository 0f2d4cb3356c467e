//! Session storage backends.

#[cfg(feature = "keyring")]
pub mod keyring;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::Result;
use super::session::StoredSession;

/// Persistence for the signed-in session.
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// Load the stored session, `None` when nobody is signed in.
    async fn load(&self) -> Result<Option<StoredSession>>;

    async fn save(&self, session: &StoredSession) -> Result<()>;

    /// Remove the stored session. Removing a missing session is not an error.
    async fn remove(&self) -> Result<()>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

/// In-memory storage, used in tests and when no keyring is available.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    session: RwLock<Option<StoredSession>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: StoredSession) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStorage for MemorySessionStorage {
    async fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self.session.read().await.clone())
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        *self.session.write().await = None;
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
