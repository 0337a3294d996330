use axum::extract::{Extension, Path, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{NewTicket, NoteListing, Product, Status, Ticket, TicketListing, UserProfile};
use crate::database::repository::{LookupRepository, NoteRepository, TicketRepository, UserRepository};
use crate::error::ApiError;
use crate::handlers::Deleted;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::ownership::{ensure_owner, Permissions};
use crate::state::AppState;
use crate::validation::{validate_description, validate_selected, validate_title, Form};

/// Submitted ticket fields. Product and status are referenced by label.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TicketForm {
    pub title: String,
    pub status: String,
    pub product: String,
    pub description: String,
}

impl TicketForm {
    pub fn validate(&self) -> Result<Form, ApiError> {
        let title = self.title.trim();
        let status = self.status.trim();
        let product = self.product.trim();
        let description = self.description.trim();

        Form::new()
            .field("title", title, validate_title(title))
            .field("status", status, validate_selected("status", status))
            .field("product", product, validate_selected("product", product))
            .field("description", description, validate_description(description))
            .check()
    }

    /// Look up the named product and status concurrently
    pub async fn resolve(&self, pool: &PgPool) -> Result<(Option<Product>, Option<Status>), ApiError> {
        let products = LookupRepository::<Product>::new(pool.clone());
        let statuses = LookupRepository::<Status>::new(pool.clone());

        let (product, status) = futures::try_join!(
            products.find_by_label(self.product.trim()),
            statuses.find_by_label(self.status.trim()),
        )?;
        Ok((product, status))
    }
}

#[derive(Debug, Serialize)]
pub struct TicketList {
    pub count: usize,
    pub tickets: Vec<TicketListing>,
}

/// GET /api/tickets - The caller's tickets, most recently updated first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<TicketList> {
    let tickets = TicketRepository::new(state.pool.clone())
        .list_by_author(auth_user.user_id)
        .await?;

    Ok(ApiResponse::success(TicketList {
        count: tickets.len(),
        tickets,
    }))
}

#[derive(Debug, Serialize)]
pub struct TicketFormData {
    pub user: UserProfile,
    pub products: Vec<Product>,
    pub statuses: Vec<Status>,
}

/// GET /api/tickets/new - Choices for the new-ticket form
pub async fn form(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<TicketFormData> {
    let users = UserRepository::new(state.pool.clone());
    let products = LookupRepository::<Product>::new(state.pool.clone());
    let statuses = LookupRepository::<Status>::new(state.pool.clone());

    let (user, products, statuses) = futures::try_join!(
        users.find(auth_user.user_id),
        products.list(None),
        statuses.list(None),
    )?;
    let user = user.ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(ApiResponse::success(TicketFormData {
        user: user.into(),
        products,
        statuses,
    }))
}

/// POST /api/tickets - Submit a ticket
///
/// Expected Input:
/// ```json
/// { "title": "VPN drops", "status": "new", "product": "Laptop", "description": "Every hour or so" }
/// ```
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<TicketForm>,
) -> ApiResult<Ticket> {
    let form = payload.validate()?;

    let (product, status) = payload.resolve(&state.pool).await?;
    let Some(product) = product else {
        return Err(form.reject("Product not found"));
    };
    let Some(status) = status else {
        return Err(form.reject("Status not found"));
    };

    let ticket = TicketRepository::new(state.pool.clone())
        .create(NewTicket {
            title: payload.title.trim().to_string(),
            description: payload.description.trim().to_string(),
            author_id: auth_user.user_id,
            product_id: product.id,
            status_id: status.id,
        })
        .await?;
    tracing::info!("User {} opened ticket {}", auth_user.username, ticket.id);

    Ok(ApiResponse::created(ticket))
}

#[derive(Debug, Serialize)]
pub struct TicketView {
    pub ticket: TicketListing,
    pub last_activity: DateTime<Utc>,
    #[serde(flatten)]
    pub permissions: Permissions,
    /// Only present for the ticket's author
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<NoteListing>>,
}

/// GET /api/tickets/:id - Ticket detail
pub async fn show(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<TicketView> {
    let ticket = TicketRepository::new(state.pool.clone())
        .find_listing(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Ticket Not Found."))?;

    let permissions = Permissions::for_user(auth_user.user_id, ticket.author_id);
    let notes = if permissions.is_owner {
        Some(NoteRepository::new(state.pool.clone()).list_by_ticket(id).await?)
    } else {
        None
    };

    Ok(ApiResponse::success(TicketView {
        last_activity: ticket.last_activity(),
        ticket,
        permissions,
        notes,
    }))
}

/// DELETE /api/tickets/:id - Withdraw one of the caller's tickets
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    let tickets = TicketRepository::new(state.pool.clone());
    let ticket = tickets
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Can't delete what does not exist"))?;

    ensure_owner(auth_user.user_id, ticket.author_id, "delete", "ticket")?;

    if !tickets.delete(id).await? {
        return Err(ApiError::not_found("Can't delete what does not exist"));
    }
    tracing::info!("User {} deleted ticket {}", auth_user.username, id);

    Ok(ApiResponse::success(Deleted::new(id, "/board/employee/tickets")))
}
