use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::models::Payload;
use crate::domain::auth::models::Role;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::ports::AuthorizationServicePort;
use crate::domain::auth::ports::PrincipalRepository;
use crate::domain::auth::ports::SessionProviderPort;

/// Domain service implementation for authorization operations.
///
/// Resolves principals across the user and musician repositories, checks
/// passwords, and hands session work to the session provider.
pub struct AuthorizationService<UR, MR, SP>
where
    UR: PrincipalRepository,
    MR: PrincipalRepository,
    SP: SessionProviderPort,
{
    user_repository: Arc<UR>,
    musician_repository: Arc<MR>,
    session_provider: Arc<SP>,
    password_hasher: auth::PasswordHasher,
}

impl<UR, MR, SP> AuthorizationService<UR, MR, SP>
where
    UR: PrincipalRepository,
    MR: PrincipalRepository,
    SP: SessionProviderPort,
{
    /// Create a new authorization service with injected dependencies.
    ///
    /// # Arguments
    /// * `user_repository` - Lookup of end-user accounts
    /// * `musician_repository` - Lookup of musician accounts
    /// * `session_provider` - Session lifecycle implementation
    pub fn new(
        user_repository: Arc<UR>,
        musician_repository: Arc<MR>,
        session_provider: Arc<SP>,
    ) -> Self {
        Self {
            user_repository,
            musician_repository,
            session_provider,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn repository(&self, role: Role) -> &dyn PrincipalRepository {
        match role {
            Role::User => &*self.user_repository,
            Role::Musician => &*self.musician_repository,
        }
    }

    /// Find the first principal kind, in lookup order, whose account with
    /// this name accepts the password.
    async fn authenticate(&self, credentials: &Credentials) -> Result<Payload, AuthError> {
        let mut name_found = false;

        for role in Role::LOOKUP_ORDER {
            let principal = self
                .repository(role)
                .find_by_name(&credentials.name)
                .await
                .map_err(|e| {
                    tracing::error!(
                        name = %credentials.name,
                        role = %role,
                        error = %e,
                        "Principal lookup failed"
                    );
                    AuthError::from(e)
                })?;

            let Some(principal) = principal else {
                continue;
            };
            name_found = true;

            if self
                .password_hasher
                .compare_password_with_hash(&credentials.password, &principal.password)
            {
                return Ok(Payload::new(principal.id, role));
            }
        }

        if name_found {
            Err(AuthError::IncorrectPassword)
        } else {
            Err(AuthError::IncorrectName)
        }
    }
}

#[async_trait]
impl<UR, MR, SP> AuthorizationServicePort for AuthorizationService<UR, MR, SP>
where
    UR: PrincipalRepository,
    MR: PrincipalRepository,
    SP: SessionProviderPort,
{
    async fn log_in(&self, credentials: Credentials) -> Result<TokenPair, AuthError> {
        let payload = self.authenticate(&credentials).await.map_err(|e| {
            tracing::warn!(name = %credentials.name, error = %e, "Failed to authorize principal");
            e
        })?;

        let tokens = self
            .session_provider
            .new_session(payload)
            .await
            .map_err(|e| {
                tracing::error!(
                    principal_id = %payload.principal_id,
                    role = %payload.role,
                    error = %e,
                    "Failed to create session"
                );
                AuthError::from(e)
            })?;

        tracing::info!(
            principal_id = %payload.principal_id,
            role = %payload.role,
            "Principal successfully authorized"
        );

        Ok(tokens)
    }

    async fn log_out(&self, refresh_token: &str) -> Result<(), AuthError> {
        self.session_provider
            .close_session(refresh_token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to close session");
                AuthError::from(e)
            })?;

        tracing::info!("Session closed");

        Ok(())
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        self.session_provider
            .refresh_session(refresh_token)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Failed to refresh session");
                AuthError::from(e)
            })
    }

    fn verify_token(&self, access_token: &str) -> Result<Payload, AuthError> {
        let payload = self
            .session_provider
            .verify_token(access_token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Failed to verify token");
                AuthError::from(e)
            })?;

        tracing::debug!(
            principal_id = %payload.principal_id,
            role = %payload.role,
            "Token verified"
        );

        Ok(payload)
    }
}
