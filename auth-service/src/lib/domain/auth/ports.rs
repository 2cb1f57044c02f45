use std::time::Duration;

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::errors::PrincipalRepositoryError;
use crate::domain::auth::errors::SessionError;
use crate::domain::auth::errors::SessionStoreError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::Payload;
use crate::domain::auth::models::PrincipalCredentials;
use crate::domain::auth::models::TokenPair;

/// Port for the authorization facade used by the HTTP layer.
#[async_trait]
pub trait AuthorizationServicePort: Send + Sync + 'static {
    /// Authenticate a principal by name and password and open a session.
    ///
    /// User accounts are consulted before musician accounts.
    ///
    /// # Arguments
    /// * `credentials` - Name and plaintext password
    ///
    /// # Returns
    /// Fresh access and refresh token pair
    ///
    /// # Errors
    /// * `IncorrectName` - No principal of any kind has this name
    /// * `IncorrectPassword` - A principal has this name but the password does not match
    /// * `PrincipalLookup` - A principal repository failed
    /// * `Session` - The session could not be persisted
    async fn log_in(&self, credentials: Credentials) -> Result<TokenPair, AuthError>;

    /// Close the session identified by a refresh token.
    ///
    /// Access tokens already handed out for the session stay valid until
    /// they expire on their own.
    ///
    /// # Arguments
    /// * `refresh_token` - Refresh token of the session; an access token is rejected
    ///
    /// # Errors
    /// * `Session` - Token invalid, session already closed, or store failure
    async fn log_out(&self, refresh_token: &str) -> Result<(), AuthError>;

    /// Exchange a refresh token for a new token pair.
    ///
    /// The presented refresh token is consumed; using it again fails.
    ///
    /// # Errors
    /// * `Session` - Token invalid or expired, already consumed, or store failure
    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Verify an access token and return its payload.
    ///
    /// Stateless: does not consult the session store.
    ///
    /// # Errors
    /// * `Session` - Token malformed, tampered with, expired, or not an access token
    fn verify_token(&self, access_token: &str) -> Result<Payload, AuthError>;
}

/// Session lifecycle over a token codec and a session store.
#[async_trait]
pub trait SessionProviderPort: Send + Sync + 'static {
    /// Mint an access and refresh token for `payload` and persist the refresh token.
    ///
    /// # Errors
    /// * `Token` - Signing failed
    /// * `Store` - The session record could not be written; the minted tokens are discarded
    async fn new_session(&self, payload: Payload) -> Result<TokenPair, SessionError>;

    /// Consume a refresh token and open a replacement session for its payload.
    ///
    /// # Errors
    /// * `Token` - Refresh token malformed, tampered with, expired or of the wrong kind
    /// * `Revoked` - No live session for this refresh token
    /// * `Store` - Session store failure
    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, SessionError>;

    /// Delete the session record of a refresh token.
    ///
    /// An expired but authentic refresh token is still accepted.
    ///
    /// # Errors
    /// * `Token` - Refresh token malformed, tampered with or of the wrong kind
    /// * `Revoked` - No live session for this refresh token
    /// * `Store` - Session store failure
    async fn close_session(&self, refresh_token: &str) -> Result<(), SessionError>;

    /// Verify an access token by signature and expiry alone.
    ///
    /// # Errors
    /// * `Token` - Access token malformed, tampered with, expired or of the wrong kind
    fn verify_token(&self, access_token: &str) -> Result<Payload, SessionError>;
}

/// Name lookup over one kind of principal.
#[async_trait]
pub trait PrincipalRepository: Send + Sync + 'static {
    /// Retrieve the stored credentials of a principal by name.
    ///
    /// # Arguments
    /// * `name` - Principal name, unique within this kind
    ///
    /// # Returns
    /// Optional credentials (None if no principal has this name)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PrincipalCredentials>, PrincipalRepositoryError>;
}

/// TTL-capable key/value storage of session records.
///
/// Records are keyed by refresh token. Single-key writes and deletes must be
/// atomic.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Insert or replace the record for `key`, expiring after `ttl`.
    ///
    /// # Errors
    /// * `Serialization` - Payload could not be serialized
    /// * `Connection` - Store unreachable or command failed
    async fn set(&self, key: &str, payload: &Payload, ttl: Duration)
        -> Result<(), SessionStoreError>;

    /// Delete exactly one record.
    ///
    /// # Errors
    /// * `NotFound` - No live record for `key`
    /// * `Connection` - Store unreachable or command failed
    async fn del(&self, key: &str) -> Result<(), SessionStoreError>;
}
