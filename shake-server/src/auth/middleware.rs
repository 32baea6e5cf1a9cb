//! Authentication middleware
//!
//! `require_auth` validates the bearer token and inserts a [`CurrentUser`]
//! extension; `require_manager` must run after it.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use shared::error::AppError;

use super::jwt::{CurrentUser, decode_token};
use crate::state::AppState;

/// Middleware that extracts and verifies the JWT from the Authorization header
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::with_message(
                shared::error::ErrorCode::NotAuthenticated,
                "Access denied. No token provided.",
            )
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(AppError::invalid_token)?;

    let claims = decode_token(token, &state.jwt_secret)?;
    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}

/// Middleware that rejects non-manager users
pub async fn require_manager(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or_else(AppError::not_authenticated)?;

    if !user.is_manager() {
        tracing::warn!(user_id = user.id, path = %request.uri().path(), "Manager access denied");
        return Err(AppError::manager_required());
    }

    Ok(next.run(request).await)
}
