/// Stored password record.
///
/// `hash` is the Argon2id PHC string derived from the password and `salt`;
/// `salt` is persisted in its own column next to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaltedPassword {
    pub hash: String,
    pub salt: String,
}

impl SaltedPassword {
    pub fn new(hash: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            salt: salt.into(),
        }
    }
}
