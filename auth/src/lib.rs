//! Authentication primitives library
//!
//! Provides the credential and token building blocks of the session service:
//! - Password hashing (Argon2id, salt kept alongside the digest)
//! - Session token signing and verification (HS256 JWT)
//!
//! Nothing here performs I/O. Session persistence and principal lookup live in
//! the service that uses these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let salted = hasher.encode_password("my_password").unwrap();
//! assert!(hasher.compare_password_with_hash("my_password", &salted));
//! assert!(!hasher.compare_password_with_hash("other", &salted));
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenCodec, TokenKind};
//! use chrono::Duration;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct Identity {
//!     principal_id: String,
//! }
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let identity = Identity { principal_id: "alice".to_string() };
//!
//! let token = codec.sign(&identity, TokenKind::Access, Duration::minutes(15)).unwrap();
//! let decoded: Identity = codec.verify(&token, TokenKind::Access).unwrap();
//! assert_eq!(decoded, identity);
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenKind;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::SaltedPassword;
