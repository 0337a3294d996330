use axum::extract::{Extension, State};
use serde::Serialize;

use crate::database::models::{Product, Role, Service, Status, UserProfile};
use crate::database::repository::{LookupRepository, NoteRepository, TicketRepository, UserRepository};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct Counts {
    pub users: i64,
    pub tickets: i64,
    pub notes: i64,
    pub products: i64,
    pub services: i64,
    pub roles: i64,
    pub statuses: i64,
}

#[derive(Debug, Serialize)]
pub struct AdminBoard {
    pub user: UserProfile,
    pub counts: Counts,
}

/// GET /api/admin - Administrator landing page with record counts
pub async fn board(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<AdminBoard> {
    let pool = &state.pool;
    let users = UserRepository::new(pool.clone());
    let tickets = TicketRepository::new(pool.clone());
    let notes = NoteRepository::new(pool.clone());
    let products = LookupRepository::<Product>::new(pool.clone());
    let services = LookupRepository::<Service>::new(pool.clone());
    let roles = LookupRepository::<Role>::new(pool.clone());
    let statuses = LookupRepository::<Status>::new(pool.clone());

    let (user, users, tickets, notes, products, services, roles, statuses) = futures::try_join!(
        users.find(auth_user.user_id),
        users.count(),
        tickets.count(),
        notes.count(),
        products.count(),
        services.count(),
        roles.count(),
        statuses.count(),
    )?;
    let user = user.ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(ApiResponse::success(AdminBoard {
        user: user.into(),
        counts: Counts {
            users,
            tickets,
            notes,
            products,
            services,
            roles,
            statuses,
        },
    }))
}
