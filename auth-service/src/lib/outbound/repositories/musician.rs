use async_trait::async_trait;
use sqlx::PgPool;

use super::credentials::fetch_credentials;
use crate::domain::auth::errors::PrincipalRepositoryError;
use crate::domain::auth::models::PrincipalCredentials;
use crate::domain::auth::ports::PrincipalRepository;

const FIND_BY_NAME: &str = r#"
    SELECT id, password, salt
    FROM musicians
    WHERE name = $1
"#;

/// Credential lookup over musician accounts.
pub struct PostgresMusicianRepository {
    pool: PgPool,
}

impl PostgresMusicianRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PrincipalRepository for PostgresMusicianRepository {
    async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<PrincipalCredentials>, PrincipalRepositoryError> {
        fetch_credentials(&self.pool, FIND_BY_NAME, name).await
    }
}
