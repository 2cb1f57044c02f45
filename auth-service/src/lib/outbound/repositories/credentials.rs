use auth::SaltedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::errors::PrincipalRepositoryError;
use crate::domain::auth::models::PrincipalCredentials;
use crate::domain::auth::models::PrincipalId;

/// Credential columns shared by the `users` and `musicians` tables.
#[derive(Debug, sqlx::FromRow)]
struct CredentialsRow {
    id: Uuid,
    password: String,
    salt: String,
}

impl CredentialsRow {
    fn into_credentials(self) -> PrincipalCredentials {
        PrincipalCredentials {
            id: PrincipalId(self.id),
            password: SaltedPassword::new(self.password, self.salt),
        }
    }
}

pub(super) async fn fetch_credentials(
    pool: &PgPool,
    query: &'static str,
    name: &str,
) -> Result<Option<PrincipalCredentials>, PrincipalRepositoryError> {
    let row = sqlx::query_as::<_, CredentialsRow>(query)
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(|e| PrincipalRepositoryError::DatabaseError(e.to_string()))?;

    Ok(row.map(CredentialsRow::into_credentials))
}
