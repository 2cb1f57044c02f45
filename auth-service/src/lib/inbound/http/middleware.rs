use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use axum::Extension;

use crate::domain::auth::access::ensure_role;
use crate::domain::auth::models::Payload;
use crate::domain::auth::models::PrincipalId;
use crate::domain::auth::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type to store the authenticated principal in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedPrincipal {
    pub principal_id: PrincipalId,
    pub role: Role,
}

impl AuthenticatedPrincipal {
    pub fn payload(&self) -> Payload {
        Payload::new(self.principal_id, self.role)
    }
}

impl From<Payload> for AuthenticatedPrincipal {
    fn from(payload: Payload) -> Self {
        Self {
            principal_id: payload.principal_id,
            role: payload.role,
        }
    }
}

/// Middleware that verifies the bearer access token and adds the principal to
/// request extensions
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())?;

    let payload = state.auth_service.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "Access token rejected");
        ApiError::from(e)
    })?;

    req.extensions_mut()
        .insert(AuthenticatedPrincipal::from(payload));

    Ok(next.run(req).await)
}

/// Middleware that lets only user principals through. Runs after `authenticate`.
pub async fn require_user(
    Extension(principal): Extension<AuthenticatedPrincipal>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(principal, Role::User)?;
    Ok(next.run(req).await)
}

/// Middleware that lets only musician principals through. Runs after `authenticate`.
pub async fn require_musician(
    Extension(principal): Extension<AuthenticatedPrincipal>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(principal, Role::Musician)?;
    Ok(next.run(req).await)
}

fn require_role(principal: AuthenticatedPrincipal, required: Role) -> Result<(), ApiError> {
    ensure_role(&principal.payload(), required).map_err(|e| {
        tracing::warn!(
            principal_id = %principal.principal_id,
            role = %principal.role,
            required = %required,
            "Access denied"
        );
        ApiError::from(e)
    })
}

/// Token carried by an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    auth_str
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}
