//! Typed access to the `token` and `user` storage keys.

use std::sync::Arc;

use inkpost_shared::constants::{SESSION_TOKEN_KEY, SESSION_USER_KEY};
use inkpost_shared::ProfileSnapshot;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::kv::{KeyValueStore, StorageEvent};

/// Process-wide session state: the bearer token issued by the API and the
/// cached profile snapshot. Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// The stored bearer token, if any. Empty values count as absent.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .store
            .get(SESSION_TOKEN_KEY)?
            .filter(|t| !t.is_empty()))
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.store.set(SESSION_TOKEN_KEY, token)
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// The cached profile. A snapshot that no longer parses is treated as
    /// missing.
    pub fn user(&self) -> Result<Option<ProfileSnapshot>> {
        let Some(json) = self.store.get(SESSION_USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring corrupt profile snapshot");
                Ok(None)
            }
        }
    }

    pub fn set_user(&self, snapshot: &ProfileSnapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.store.set(SESSION_USER_KEY, &json)
    }

    pub fn clear_user(&self) -> Result<()> {
        self.store.remove(SESSION_USER_KEY)?;
        Ok(())
    }

    /// Forget the token and the profile snapshot.
    pub fn logout(&self) -> Result<()> {
        self.store.remove(SESSION_TOKEN_KEY)?;
        self.store.remove(SESSION_USER_KEY)?;
        tracing::info!("session cleared");
        Ok(())
    }

    /// Change notifications for any key; readers re-read on receipt.
    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.store.subscribe()
    }
}
