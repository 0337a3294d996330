use axum::extract::{Extension, State};
use serde::Serialize;

use crate::database::models::UserProfile;
use crate::handlers::current_user;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub href: String,
}

#[derive(Debug, Serialize)]
pub struct Board {
    pub user: UserProfile,
    pub links: Vec<Link>,
}

/// GET /api/board - Employee landing page
pub async fn board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Board> {
    let user = current_user(&state.pool, &auth_user).await?;

    let links = vec![
        Link {
            label: "New ticket",
            href: "/api/tickets/new".to_string(),
        },
        Link {
            label: "My tickets",
            href: "/api/tickets".to_string(),
        },
        Link {
            label: "My profile",
            href: format!("/api/users/{}", user.id),
        },
    ];

    Ok(ApiResponse::success(Board {
        user: user.into(),
        links,
    }))
}
