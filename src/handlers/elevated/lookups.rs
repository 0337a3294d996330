//! Reference data handlers, written once for every [`Lookup`] kind.
//!
//! Request bodies name the label by its column, e.g. `{"device": "Laptop"}` for
//! products or `{"type": "open"}` for statuses.

use axum::extract::{Extension, Path, Query, State};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::database::models::Lookup;
use crate::database::repository::{LookupRepository, UserRepository};
use crate::database::DatabaseError;
use crate::error::ApiError;
use crate::handlers::Deleted;
use crate::middleware::{ApiJson, ApiResponse, ApiResult, AuthUser};
use crate::ownership::{ensure_manageable, Permissions};
use crate::search::SearchQuery;
use crate::state::AppState;
use crate::validation::{validate_label, Form};

#[derive(Debug, Serialize)]
pub struct LookupList<T> {
    pub count: usize,
    pub items: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct AuthorRef {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LookupView<T> {
    pub item: T,
    /// Null once the author's account is gone
    pub author: Option<AuthorRef>,
    #[serde(flatten)]
    pub permissions: Permissions,
}

fn label_from(payload: &Map<String, Value>, field: &str) -> String {
    payload
        .get(field)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn label_form<T: Lookup>(label: &str) -> Result<Form, ApiError> {
    Form::new()
        .field(T::LABEL, label, validate_label(T::TITLE, label))
        .check()
}

/// GET /api/admin/<kind>?query= - Rows ordered by label
pub async fn list<T: Lookup>(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<LookupList<T>> {
    let items = LookupRepository::<T>::new(state.pool.clone())
        .list(search.pattern().as_deref())
        .await?;

    Ok(ApiResponse::success(LookupList {
        count: items.len(),
        items,
    }))
}

/// POST /api/admin/<kind> - Create a row owned by the caller
pub async fn create<T: Lookup>(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<Map<String, Value>>,
) -> ApiResult<T> {
    let label = label_from(&payload, T::LABEL);
    let form = label_form::<T>(&label)?;

    let repo = LookupRepository::<T>::new(state.pool.clone());
    if repo.find_by_label(&label).await?.is_some() {
        return Err(form.reject(format!("{} '{}' already exists", T::TITLE, label)));
    }

    let row = repo.create(&label, auth_user.user_id).await?;
    tracing::info!("{} created {} '{}'", auth_user.username, T::KIND, label);

    Ok(ApiResponse::created(row))
}

/// GET /api/admin/<kind>/:id - Row with its author, if the author still exists
pub async fn show<T: Lookup>(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<LookupView<T>> {
    let item = LookupRepository::<T>::new(state.pool.clone())
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} Not Found.", T::TITLE)))?;

    let author = match item.owner_id() {
        Some(owner_id) => UserRepository::new(state.pool.clone())
            .find(owner_id)
            .await?
            .map(|user| AuthorRef {
                id: user.id,
                username: user.username,
            }),
        None => None,
    };

    Ok(ApiResponse::success(LookupView {
        permissions: Permissions::for_reference(auth_user.user_id, item.owner_id()),
        author,
        item,
    }))
}

/// PUT /api/admin/<kind>/:id - Rename a row the caller owns, or an orphaned one
pub async fn update<T: Lookup>(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<Map<String, Value>>,
) -> ApiResult<T> {
    let label = label_from(&payload, T::LABEL);
    let form = label_form::<T>(&label)?;

    let repo = LookupRepository::<T>::new(state.pool.clone());
    let existing = repo
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} Not Found.", T::TITLE)))?;
    ensure_manageable(auth_user.user_id, existing.owner_id(), "update", T::KIND)?;

    if let Some(other) = repo.find_by_label(&label).await? {
        if other.id() != id {
            return Err(form.reject(format!("{} '{}' already exists", T::TITLE, label)));
        }
    }

    let row = repo
        .rename(id, &label)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("{} Not Found.", T::TITLE)))?;
    tracing::info!("{} renamed {} {} to '{}'", auth_user.username, T::KIND, id, label);

    Ok(ApiResponse::success(row))
}

/// DELETE /api/admin/<kind>/:id - Remove a row the caller owns, or an orphaned one
///
/// Products and statuses still referenced by tickets are kept (409).
pub async fn delete<T: Lookup>(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> ApiResult<Deleted> {
    let repo = LookupRepository::<T>::new(state.pool.clone());
    let existing = repo
        .find(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Can't delete what does not exist"))?;
    ensure_manageable(auth_user.user_id, existing.owner_id(), "delete", T::KIND)?;

    let deleted = repo.delete(id).await.map_err(|e| match e {
        DatabaseError::Conflict(_) => ApiError::conflict(format!(
            "{} '{}' is still used by tickets",
            T::TITLE,
            existing.label()
        )),
        other => other.into(),
    })?;
    if !deleted {
        return Err(ApiError::not_found("Can't delete what does not exist"));
    }
    tracing::info!("{} deleted {} '{}'", auth_user.username, T::KIND, existing.label());

    Ok(ApiResponse::success(Deleted::new(id, "/board/admin")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Product, Status};
    use axum::http::StatusCode;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn label_read_from_kind_column() {
        let payload = body(json!({ "type": "  open ", "device": "ignored" }));
        assert_eq!(label_from(&payload, Status::LABEL), "open");
        assert_eq!(label_from(&payload, "name"), "");
        assert_eq!(label_from(&body(json!({ "device": 42 })), Product::LABEL), "");
    }

    #[test]
    fn short_label_names_the_kind() {
        let err = label_form::<Product>("TV").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let json = err.to_json();
        assert_eq!(
            json["field_errors"]["device"],
            "Product must be an at least 3 characters long string"
        );
        assert_eq!(json["fields"]["device"], "TV");
    }
}
