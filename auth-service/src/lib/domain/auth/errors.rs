use auth::JwtError;
use thiserror::Error;

use crate::domain::auth::models::Role;

/// Error for PrincipalId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrincipalIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for integer role decoding
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unexpected role: {0}")]
    Unexpected(u8),
}

/// Error for session configuration validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionConfigError {
    #[error("Token secret too short: minimum {min} bytes, got {actual}")]
    SecretTooShort { min: usize, actual: usize },

    #[error("Token lifetime must be positive, got {minutes} minutes for {kind} tokens")]
    NonPositiveTtl { kind: &'static str, minutes: i64 },

    #[error("Refresh token lifetime ({refresh} minutes) must exceed access token lifetime ({access} minutes)")]
    RefreshNotLonger { access: i64, refresh: i64 },

    #[error("Token lifetime of {minutes} minutes for {kind} tokens is out of range")]
    TtlOutOfRange { kind: &'static str, minutes: i64 },
}

/// Error for session store adapters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionStoreError {
    #[error("Session not found")]
    NotFound,

    #[error("Failed to serialize session payload: {0}")]
    Serialization(String),

    #[error("Session store connection failed: {0}")]
    Connection(String),
}

/// Error for principal lookup adapters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrincipalRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Error for session lifecycle operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    /// The refresh token is well-formed but no live session backs it:
    /// already rotated, logged out or expired in the store.
    #[error("Session has been revoked or has expired")]
    Revoked,

    #[error("Session store error: {0}")]
    Store(#[from] SessionStoreError),
}

/// Top-level error for authorization service operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication error: incorrect name")]
    IncorrectName,

    #[error("Authentication error: incorrect password")]
    IncorrectPassword,

    #[error("Principal lookup failed: {0}")]
    PrincipalLookup(#[from] PrincipalRepositoryError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

impl AuthError {
    /// True for failures caused by the caller's credentials or tokens rather
    /// than by an unavailable dependency.
    pub fn is_unauthenticated(&self) -> bool {
        match self {
            AuthError::IncorrectName | AuthError::IncorrectPassword => true,
            AuthError::PrincipalLookup(_) => false,
            AuthError::Session(SessionError::Revoked) => true,
            AuthError::Session(SessionError::Token(JwtError::EncodingFailed(_))) => false,
            AuthError::Session(SessionError::Token(_)) => true,
            AuthError::Session(SessionError::Store(_)) => false,
        }
    }
}

/// Error for role and ownership checks
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("Forbidden: {required} role required, principal is a {actual}")]
    WrongRole { required: Role, actual: Role },

    #[error("Forbidden: resource belongs to another principal")]
    NotOwner,
}
