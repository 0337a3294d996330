use axum::extract::{Extension, Path, Query, State};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{NewNote, Note, NoteListing};
use crate::database::repository::{NoteRepository, TicketRepository};
use crate::error::ApiError;
use crate::handlers::Deleted;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::ownership::ensure_owner;
use crate::search::SearchQuery;
use crate::state::AppState;
use crate::validation::{validate_note_text, Form};

#[derive(Debug, Serialize)]
pub struct NoteList {
    pub count: usize,
    pub notes: Vec<NoteListing>,
}

/// GET /api/admin/notes?query= - Notes matching text, author, ticket title or product
pub async fn list(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<NoteList> {
    let notes = NoteRepository::new(state.pool.clone())
        .search(search.pattern().as_deref())
        .await?;

    Ok(ApiResponse::success(NoteList {
        count: notes.len(),
        notes,
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoteForm {
    pub text: String,
}

/// POST /api/admin/tickets/:id/notes - Attach a technician note to a ticket
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(ticket_id): Path<Uuid>,
    ApiJson(payload): ApiJson<NoteForm>,
) -> ApiResult<Note> {
    let text = payload.text.trim();
    Form::new().field("text", text, validate_note_text(text)).check()?;

    TicketRepository::new(state.pool.clone())
        .find(ticket_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Ticket Not Found."))?;

    let note = NoteRepository::new(state.pool.clone())
        .create(NewNote {
            text: text.to_string(),
            author_id: auth_user.user_id,
            ticket_id,
        })
        .await?;
    tracing::info!("{} added note {} to ticket {}", auth_user.username, note.id, ticket_id);

    Ok(ApiResponse::created(note))
}

/// DELETE /api/admin/notes/:id - Remove a note the caller wrote
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    let notes = NoteRepository::new(state.pool.clone());
    let note = notes
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Can't delete what does not exist"))?;
    ensure_owner(auth_user.user_id, note.author_id, "delete", "note")?;

    if !notes.delete(id).await? {
        return Err(ApiError::not_found("Can't delete what does not exist"));
    }
    tracing::info!("{} deleted note {}", auth_user.username, id);

    Ok(ApiResponse::success(Deleted::new(id, "/board/admin/notes")))
}
