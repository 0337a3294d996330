use axum::{extract::Request, middleware::Next, response::Response};

use super::auth::AuthUser;
use crate::error::ApiError;

/// Gate for /api/admin routes. Must run after `jwt_auth_middleware`.
pub async fn require_admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("JWT authentication required before admin validation"))?;

    if !auth_user.admin {
        tracing::warn!("Admin access denied for {} ({})", auth_user.username, auth_user.user_id);
        return Err(ApiError::forbidden("Administrator access required"));
    }

    Ok(next.run(request).await)
}
