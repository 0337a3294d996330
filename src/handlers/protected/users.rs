use axum::extract::{Extension, Path, State};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::UserProfile;
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::handlers::Deleted;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::ownership::{is_owner, Permissions};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserView {
    pub user: UserProfile,
    #[serde(flatten)]
    pub permissions: Permissions,
}

/// GET /api/users/:id - Profile page. Employees may only view themselves.
pub async fn show(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<UserView> {
    if !is_owner(auth_user.user_id, id) && !auth_user.admin {
        return Err(ApiError::forbidden("You can only view your own profile"));
    }

    let user = UserRepository::new(state.pool.clone())
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("User Not Found."))?;

    Ok(ApiResponse::success(UserView {
        permissions: Permissions::for_user(auth_user.user_id, user.id),
        user: user.into(),
    }))
}

/// DELETE /api/users/:id - Close the caller's own account
///
/// Tickets and notes the user authored are removed with it. Reference rows
/// they created stay behind without an author.
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    if !is_owner(auth_user.user_id, id) {
        tracing::warn!("User {} tried to delete account {}", auth_user.user_id, id);
        return Err(ApiError::forbidden("You can only delete your own account"));
    }

    if !UserRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::not_found("User Not Found."));
    }
    tracing::info!("User {} deleted their account", auth_user.username);

    Ok(ApiResponse::success(Deleted::new(id, "/")))
}
