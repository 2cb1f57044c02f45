use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::domain::auth::errors::SessionStoreError;
use crate::domain::auth::models::Payload;
use crate::domain::auth::ports::SessionStore;

const KEY_PREFIX: &str = "session:";

/// Session store backed by Redis.
///
/// Records are written with `SET key value EX seconds` and removed with
/// `DEL key`; Redis expires them on its own.
#[derive(Clone)]
pub struct RedisSessionStore {
    connection: ConnectionManager,
}

impl RedisSessionStore {
    pub fn new(connection: ConnectionManager) -> Self {
        Self { connection }
    }

    /// Open a managed, auto-reconnecting connection to `url`.
    ///
    /// # Errors
    /// * `Connection` - URL is invalid or the server is unreachable
    pub async fn connect(url: &str) -> Result<Self, SessionStoreError> {
        let client =
            redis::Client::open(url).map_err(|e| SessionStoreError::Connection(e.to_string()))?;

        let connection = ConnectionManager::new(client)
            .await
            .map_err(|e| SessionStoreError::Connection(e.to_string()))?;

        Ok(Self::new(connection))
    }

    fn key(token: &str) -> String {
        format!("{}{}", KEY_PREFIX, token)
    }

    /// `EX` takes whole seconds and rejects zero.
    fn expiry_seconds(ttl: Duration) -> u64 {
        ttl.as_secs().max(1)
    }

    /// Interpret the reply of `DEL`: the number of keys removed.
    fn deletion_outcome(deleted: i64) -> Result<(), SessionStoreError> {
        if deleted == 0 {
            return Err(SessionStoreError::NotFound);
        }

        Ok(())
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn set(
        &self,
        key: &str,
        payload: &Payload,
        ttl: Duration,
    ) -> Result<(), SessionStoreError> {
        let payload = serde_json::to_string(payload)
            .map_err(|e| SessionStoreError::Serialization(e.to_string()))?;

        let mut connection = self.connection.clone();
        connection
            .set_ex::<_, _, ()>(Self::key(key), payload, Self::expiry_seconds(ttl))
            .await
            .map_err(|e| SessionStoreError::Connection(e.to_string()))
    }

    async fn del(&self, key: &str) -> Result<(), SessionStoreError> {
        let mut connection = self.connection.clone();
        let deleted: i64 = connection
            .del(Self::key(key))
            .await
            .map_err(|e| SessionStoreError::Connection(e.to_string()))?;

        Self::deletion_outcome(deleted)
    }
}
