use chrono::Duration;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use super::claims::SessionClaims;
use super::claims::TokenKind;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// Signs and verifies self-contained session tokens.
///
/// A token carries a service-defined payload, its kind, a unique `jti` and an
/// `exp` timestamp. Verification is stateless: signature, kind and expiry are
/// all that is checked.
pub struct TokenCodec {
    handler: JwtHandler,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            handler: JwtHandler::new(secret),
        }
    }

    /// Sign `payload` into a token of the given kind that expires `ttl` from now.
    ///
    /// # Errors
    /// * `EncodingFailed` - The payload could not be serialized or signed, or
    ///   `ttl` pushes the expiry past the representable range
    pub fn sign<P: Serialize>(
        &self,
        payload: &P,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| {
            JwtError::EncodingFailed(format!("token lifetime {} overflows expiry", ttl))
        })?;
        let claims = SessionClaims {
            payload,
            kind,
            jti: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        self.handler.encode(&claims)
    }

    /// Verify a token and return its payload.
    ///
    /// # Errors
    /// * `MalformedToken` - Not a decodable token for this payload type
    /// * `InvalidSignature` - Tampered with, or signed with another key
    /// * `UnexpectedKind` - A token of the other kind
    /// * `TokenExpired` - `exp` is at or before the current time
    pub fn verify<P: DeserializeOwned>(&self, token: &str, kind: TokenKind) -> Result<P, JwtError> {
        let claims = self.decode_claims::<P>(token, kind)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        Ok(claims.payload)
    }

    /// Verify a token without rejecting it for being expired.
    ///
    /// Signature and kind are still enforced. Meant for cleanup paths such as
    /// logout, never for authorizing a request.
    pub fn verify_allow_expired<P: DeserializeOwned>(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<P, JwtError> {
        self.decode_claims::<P>(token, kind)
            .map(|claims| claims.payload)
    }

    fn decode_claims<P: DeserializeOwned>(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<SessionClaims<P>, JwtError> {
        let claims: SessionClaims<P> = self.handler.decode(token)?;

        if claims.kind != kind {
            return Err(JwtError::UnexpectedKind {
                expected: kind,
                actual: claims.kind,
            });
        }

        Ok(claims)
    }
}
