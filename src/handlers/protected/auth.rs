use axum::extract::{Extension, State};
use serde::Serialize;

use crate::config;
use crate::database::models::UserProfile;
use crate::handlers::current_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WhoAmI {
    #[serde(flatten)]
    pub user: UserProfile,
    pub admin: bool,
}

/// GET /api/auth/whoami - The caller's current user record
///
/// Read from the database rather than the token, so a service change shows up
/// before the token is reissued.
pub async fn whoami(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<WhoAmI> {
    let user = current_user(&state.pool, &auth_user).await?;
    let admin = user.is_admin(&config::config().desk.admin_service);

    Ok(ApiResponse::success(WhoAmI {
        user: user.into(),
        admin,
    }))
}
