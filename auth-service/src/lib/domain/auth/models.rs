use std::fmt;

use auth::SaltedPassword;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::auth::errors::PrincipalIdError;
use crate::domain::auth::errors::RoleError;

/// Principal unique identifier type.
///
/// Shared by both principal kinds; serialized as a UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(pub Uuid);

impl PrincipalId {
    /// Generate a new random principal ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a principal ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PrincipalIdError> {
        Uuid::parse_str(s)
            .map(PrincipalId)
            .map_err(|e| PrincipalIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Kind of principal a session belongs to.
///
/// Encoded in tokens as an integer: `1` for users, `2` for musicians.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Role {
    User,
    Musician,
}

impl Role {
    /// Order in which principal repositories are consulted on login.
    pub const LOOKUP_ORDER: [Role; 2] = [Role::User, Role::Musician];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Musician => "musician",
        }
    }
}

impl From<Role> for u8 {
    fn from(role: Role) -> Self {
        match role {
            Role::User => 1,
            Role::Musician => 2,
        }
    }
}

impl TryFrom<u8> for Role {
    type Error = RoleError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Role::User),
            2 => Ok(Role::Musician),
            other => Err(RoleError::Unexpected(other)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity embedded in every issued token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub principal_id: PrincipalId,
    pub role: Role,
}

impl Payload {
    pub fn new(principal_id: PrincipalId, role: Role) -> Self {
        Self { principal_id, role }
    }
}

/// Access and refresh token issued together for one session.
///
/// The access token is stateless: it stays valid until its own expiry even
/// after the session is closed. Only the refresh token is tracked and can be
/// revoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login input.
#[derive(Clone)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("name", &self.name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// What a principal repository hands back for a name lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalCredentials {
    pub id: PrincipalId,
    pub password: SaltedPassword,
}
