use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::domain::auth::models::Role;
use crate::inbound::http::middleware::AuthenticatedPrincipal;

pub async fn me(
    Extension(principal): Extension<AuthenticatedPrincipal>,
) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(StatusCode::OK, (&principal).into())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub principal_id: String,
    pub role: Role,
}

impl From<&AuthenticatedPrincipal> for MeResponseData {
    fn from(principal: &AuthenticatedPrincipal) -> Self {
        Self {
            principal_id: principal.principal_id.to_string(),
            role: principal.role,
        }
    }
}
