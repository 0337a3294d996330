use axum::extract::{Extension, Path, Query, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::database::models::{NoteListing, Product, Status, Ticket, TicketChanges, TicketListing};
use crate::database::repository::{LookupRepository, NoteRepository, TicketRepository};
use crate::error::ApiError;
use crate::handlers::protected::tickets::{TicketForm, TicketList};
use crate::handlers::Deleted;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::ownership::Permissions;
use crate::search::SearchQuery;
use crate::state::AppState;

/// GET /api/admin/tickets?query= - Every ticket, most recently updated first
pub async fn list(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<TicketList> {
    let tickets = TicketRepository::new(state.pool.clone())
        .search(search.pattern().as_deref())
        .await?;

    Ok(ApiResponse::success(TicketList {
        count: tickets.len(),
        tickets,
    }))
}

#[derive(Debug, Serialize)]
pub struct AdminTicketView {
    pub ticket: TicketListing,
    pub last_activity: DateTime<Utc>,
    #[serde(flatten)]
    pub permissions: Permissions,
    pub products: Vec<Product>,
    pub statuses: Vec<Status>,
    pub notes: Vec<NoteListing>,
}

/// GET /api/admin/tickets/:id - Ticket with its notes and the choices for editing it
pub async fn show(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<AdminTicketView> {
    let tickets = TicketRepository::new(state.pool.clone());
    let products = LookupRepository::<Product>::new(state.pool.clone());
    let statuses = LookupRepository::<Status>::new(state.pool.clone());
    let notes = NoteRepository::new(state.pool.clone());

    let (ticket, products, statuses, notes) = futures::try_join!(
        tickets.find_listing(id),
        products.list(None),
        statuses.list(None),
        notes.list_by_ticket(id),
    )?;
    let ticket = ticket.ok_or_else(|| ApiError::not_found("Ticket Not Found."))?;

    Ok(ApiResponse::success(AdminTicketView {
        last_activity: ticket.last_activity(),
        permissions: Permissions::for_user(auth_user.user_id, ticket.author_id),
        ticket,
        products,
        statuses,
        notes,
    }))
}

/// PUT /api/admin/tickets/:id - Edit any ticket; its author is left unchanged
///
/// Expected Input:
/// ```json
/// { "title": "VPN drops", "status": "in progress", "product": "Laptop", "description": "Every hour or so" }
/// ```
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<TicketForm>,
) -> ApiResult<Ticket> {
    payload.validate()?;

    let (product, status) = payload.resolve(&state.pool).await?;
    let product = product.ok_or_else(|| ApiError::not_found("Product Not Found."))?;
    let status = status.ok_or_else(|| ApiError::not_found("Status Not Found."))?;

    let ticket = TicketRepository::new(state.pool.clone())
        .update(
            id,
            TicketChanges {
                title: payload.title.trim().to_string(),
                description: payload.description.trim().to_string(),
                product_id: product.id,
                status_id: status.id,
            },
        )
        .await?
        .ok_or_else(|| ApiError::not_found("Ticket Not Found."))?;
    tracing::info!("{} updated ticket {}", auth_user.username, id);

    Ok(ApiResponse::success(ticket))
}

/// DELETE /api/admin/tickets/:id - Remove any ticket and its notes
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    if !TicketRepository::new(state.pool.clone()).delete(id).await? {
        return Err(ApiError::not_found("Can't delete what does not exist"));
    }
    tracing::info!("{} deleted ticket {}", auth_user.username, id);

    Ok(ApiResponse::success(Deleted::new(id, "/board/admin/tickets")))
}
