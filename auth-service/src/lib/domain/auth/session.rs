use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenCodec;
use auth::TokenKind;
use chrono::Duration;
use chrono::Utc;

use crate::domain::auth::errors::SessionConfigError;
use crate::domain::auth::errors::SessionError;
use crate::domain::auth::errors::SessionStoreError;
use crate::domain::auth::models::Payload;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::ports::SessionProviderPort;
use crate::domain::auth::ports::SessionStore;

/// Signing key and token lifetimes, fixed at startup.
#[derive(Clone)]
pub struct SessionConfig {
    secret: Vec<u8>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl SessionConfig {
    const MIN_SECRET_LENGTH: usize = 32;

    /// Validate and build a session configuration.
    ///
    /// # Arguments
    /// * `secret` - HMAC key, at least 32 bytes
    /// * `access_minutes` - Access token lifetime
    /// * `refresh_minutes` - Refresh token lifetime, longer than the access one
    ///
    /// # Errors
    /// * `SecretTooShort` - Key shorter than 32 bytes
    /// * `NonPositiveTtl` - A lifetime is zero or negative
    /// * `RefreshNotLonger` - Refresh lifetime does not exceed access lifetime
    /// * `TtlOutOfRange` - A lifetime cannot be represented as a token expiry
    pub fn new(
        secret: impl Into<Vec<u8>>,
        access_minutes: i64,
        refresh_minutes: i64,
    ) -> Result<Self, SessionConfigError> {
        let secret = secret.into();
        if secret.len() < Self::MIN_SECRET_LENGTH {
            return Err(SessionConfigError::SecretTooShort {
                min: Self::MIN_SECRET_LENGTH,
                actual: secret.len(),
            });
        }

        if access_minutes <= 0 {
            return Err(SessionConfigError::NonPositiveTtl {
                kind: "access",
                minutes: access_minutes,
            });
        }

        if refresh_minutes <= 0 {
            return Err(SessionConfigError::NonPositiveTtl {
                kind: "refresh",
                minutes: refresh_minutes,
            });
        }

        if refresh_minutes <= access_minutes {
            return Err(SessionConfigError::RefreshNotLonger {
                access: access_minutes,
                refresh: refresh_minutes,
            });
        }

        Ok(Self {
            secret,
            access_ttl: Self::lifetime("access", access_minutes)?,
            refresh_ttl: Self::lifetime("refresh", refresh_minutes)?,
        })
    }

    fn lifetime(kind: &'static str, minutes: i64) -> Result<Duration, SessionConfigError> {
        Duration::try_minutes(minutes)
            .filter(|ttl| Utc::now().checked_add_signed(*ttl).is_some())
            .ok_or(SessionConfigError::TtlOutOfRange { kind, minutes })
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    pub fn refresh_ttl(&self) -> Duration {
        self.refresh_ttl
    }
}

impl fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[REDACTED]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

/// Session lifecycle: issue, verify, rotate, close.
///
/// Refresh tokens are the session store keys. Access tokens never touch the
/// store, so closing a session leaves its access tokens valid until they
/// expire.
pub struct SessionProvider<SS>
where
    SS: SessionStore,
{
    codec: TokenCodec,
    store: Arc<SS>,
    access_ttl: Duration,
    refresh_ttl: Duration,
    store_ttl: std::time::Duration,
}

impl<SS> SessionProvider<SS>
where
    SS: SessionStore,
{
    pub fn new(store: Arc<SS>, config: &SessionConfig) -> Self {
        Self {
            codec: TokenCodec::new(&config.secret),
            store,
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
            // Positive by construction of SessionConfig
            store_ttl: config
                .refresh_ttl
                .to_std()
                .unwrap_or(std::time::Duration::ZERO),
        }
    }

    /// Delete the record of a consumed refresh token.
    async fn revoke(&self, refresh_token: &str, payload: &Payload) -> Result<(), SessionError> {
        self.store
            .del(refresh_token)
            .await
            .map_err(|e| match e {
                SessionStoreError::NotFound => {
                    tracing::warn!(
                        principal_id = %payload.principal_id,
                        role = %payload.role,
                        "Refresh token has no live session"
                    );
                    SessionError::Revoked
                }
                other => {
                    tracing::error!(
                        principal_id = %payload.principal_id,
                        error = %other,
                        "Failed to delete session"
                    );
                    SessionError::Store(other)
                }
            })
    }
}

#[async_trait]
impl<SS> SessionProviderPort for SessionProvider<SS>
where
    SS: SessionStore,
{
    async fn new_session(&self, payload: Payload) -> Result<TokenPair, SessionError> {
        let access_token = self
            .codec
            .sign(&payload, TokenKind::Access, self.access_ttl)?;
        let refresh_token = self
            .codec
            .sign(&payload, TokenKind::Refresh, self.refresh_ttl)?;

        self.store
            .set(&refresh_token, &payload, self.store_ttl)
            .await
            .map_err(|e| {
                tracing::error!(
                    principal_id = %payload.principal_id,
                    error = %e,
                    "Failed to persist session"
                );
                SessionError::Store(e)
            })?;

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, SessionError> {
        let payload: Payload = self.codec.verify(refresh_token, TokenKind::Refresh)?;

        // Revoke before reissuing: of two concurrent refreshes with the same
        // token only the one whose delete succeeds gets a new pair.
        self.revoke(refresh_token, &payload).await?;

        self.new_session(payload).await
    }

    async fn close_session(&self, refresh_token: &str) -> Result<(), SessionError> {
        let payload: Payload = self
            .codec
            .verify_allow_expired(refresh_token, TokenKind::Refresh)?;

        self.revoke(refresh_token, &payload).await
    }

    fn verify_token(&self, access_token: &str) -> Result<Payload, SessionError> {
        self.codec
            .verify(access_token, TokenKind::Access)
            .map_err(SessionError::from)
    }
}
