use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;
use super::salted::SaltedPassword;

/// Password hashing implementation.
///
/// Derives salted digests with Argon2id. The salt is generated per password
/// and kept next to the digest so a principal record carries both columns.
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Derive a salted digest for a plaintext password.
    ///
    /// A fresh random salt is drawn from the OS generator on every call, so
    /// encoding the same password twice yields two different records.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// SaltedPassword with the PHC string digest and its base64 salt
    ///
    /// # Errors
    /// * `HashingFailed` - The key derivation function rejected its input
    pub fn encode_password(&self, password: &str) -> Result<SaltedPassword, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(SaltedPassword::new(hash.to_string(), salt.as_str()))
    }

    /// Compare a plaintext password with a stored salted digest.
    ///
    /// Recomputes the digest with the stored salt and parameters; the final
    /// comparison is constant time. A stored record that cannot be parsed, or
    /// whose embedded salt disagrees with the salt column, never matches.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `salted` - Stored digest and salt
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn compare_password_with_hash(&self, password: &str, salted: &SaltedPassword) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(&salted.hash) else {
            return false;
        };

        let salt_matches = parsed_hash
            .salt
            .map_or(false, |salt| salt.as_str() == salted.salt);
        if !salt_matches {
            return false;
        }

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
