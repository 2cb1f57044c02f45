use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Which half of a token pair a token is.
///
/// Access and refresh tokens share one format; the kind claim keeps one from
/// being accepted where the other is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

/// Claims set of a session token.
///
/// Generic over the payload so each service embeds its own identity fields;
/// the payload is flattened next to the registered claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims<P> {
    #[serde(flatten)]
    pub payload: P,

    /// Access or refresh
    pub kind: TokenKind,

    /// JWT ID, unique per minted token
    pub jti: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl<P> SessionClaims<P> {
    /// A token is expired once its `exp` is at or before `current_timestamp`.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp <= current_timestamp
    }
}
