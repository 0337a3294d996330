use axum::extract::{Extension, Path, Query, State};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::{TicketListing, UserProfile};
use crate::database::repository::{TicketRepository, UserRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::ownership::Permissions;
use crate::search::SearchQuery;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserList {
    pub count: usize,
    pub users: Vec<UserProfile>,
}

/// GET /api/admin/users?query= - Users matching username, email or service
pub async fn list(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<UserList> {
    let users = UserRepository::new(state.pool.clone())
        .search(search.pattern().as_deref())
        .await?;

    Ok(ApiResponse::success(UserList {
        count: users.len(),
        users,
    }))
}

#[derive(Debug, Serialize)]
pub struct AdminUserView {
    pub user: UserProfile,
    pub tickets: Vec<TicketListing>,
    #[serde(flatten)]
    pub permissions: Permissions,
}

/// GET /api/admin/users/:id - Profile and every ticket the user submitted
pub async fn show(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<AdminUserView> {
    let users = UserRepository::new(state.pool.clone());
    let tickets = TicketRepository::new(state.pool.clone());

    let (user, tickets) = futures::try_join!(users.find(id), tickets.list_by_author(id))?;
    let user = user.ok_or_else(|| ApiError::not_found("User Not Found."))?;

    Ok(ApiResponse::success(AdminUserView {
        permissions: Permissions::for_user(auth_user.user_id, user.id),
        user: user.into(),
        tickets,
    }))
}
