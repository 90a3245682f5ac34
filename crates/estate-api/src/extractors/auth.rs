//! `AuthUser` extractor: pulls the bearer token from the Authorization header
//! and resolves it to an account.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use estate_auth::jwt::Claims;
use estate_core::error::AppError;
use estate_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// The caller identified by a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Validated token claims.
    pub claims: Claims,
    /// The account the token names.
    pub user: User,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let (claims, user) = state.auth_service.authenticate(token).await?;

        Ok(AuthUser { claims, user })
    }
}
