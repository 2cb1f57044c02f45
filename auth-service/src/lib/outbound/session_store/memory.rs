use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::auth::errors::SessionStoreError;
use crate::domain::auth::models::Payload;
use crate::domain::auth::ports::SessionStore;

#[derive(Debug, Clone)]
struct StoredSession {
    payload: String,
    expires_at: Instant,
}

impl StoredSession {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// Process-local session store.
///
/// Keeps serialized payloads with a deadline; an entry past its deadline
/// behaves exactly like a missing one. Deletes take the write lock, so of two
/// concurrent deletes of one key only one succeeds.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload stored under `key`, if the record is still live.
    pub async fn get(&self, key: &str) -> Option<Payload> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(key)?;

        if !session.is_live(Instant::now()) {
            return None;
        }

        serde_json::from_str(&session.payload).ok()
    }

    /// Number of live records.
    pub async fn live_sessions(&self) -> usize {
        let now = Instant::now();
        self.sessions
            .read()
            .await
            .values()
            .filter(|session| session.is_live(now))
            .count()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn set(
        &self,
        key: &str,
        payload: &Payload,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_string(payload)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, session| session.is_live(now));
        sessions.insert(
            key.to_string(),
            StoredSession {
                payload,
                expires_at: now + ttl,
            },
        );

        Ok(())
    }

    async fn del(&self, key: &str) -> Result<(), SessionStoreError> {
        let removed = self.sessions.write().await.remove(key);

        match removed {
            Some(session) if session.is_live(Instant::now()) => Ok(()),
            _ => Err(SessionStoreError::NotFound),
        }
    }
}
