use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;
use tokio::sync::RwLock;

use crate::domain::auth::errors::PrincipalRepositoryError;
use crate::domain::auth::models::PrincipalCredentials;
use crate::domain::auth::models::PrincipalId;
use crate::domain::auth::ports::PrincipalRepository;

/// Process-local principal lookup for one kind of principal.
///
/// Used for local runs and integration tests where no database is available.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPrincipalRepository {
    principals: Arc<RwLock<HashMap<String, PrincipalCredentials>>>,
}

impl InMemoryPrincipalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a principal under `name`, replacing any previous record.
    pub async fn insert(&self, name: impl Into<String>, credentials: PrincipalCredentials) {
        self.principals
            .write()
            .await
            .insert(name.into(), credentials);
    }

    /// Hash `password` and register a new principal under `name`.
    ///
    /// # Returns
    /// Identifier assigned to the new principal
    ///
    /// # Errors
    /// * `HashingFailed` - Password could not be hashed
    pub async fn register(
        &self,
        hasher: &PasswordHasher,
        name: impl Into<String>,
        password: &str,
    ) -> Result<PrincipalId, PasswordError> {
        let id = PrincipalId::new();
        let password = hasher.encode_password(password)?;

        self.insert(name, PrincipalCredentials { id, password }).await;

        Ok(id)
    }
}

#[async_trait]
impl PrincipalRepository for InMemoryPrincipalRepository {
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PrincipalCredentials>, PrincipalRepositoryError> {
        Ok(self.principals.read().await.get(name).cloned())
    }
}
