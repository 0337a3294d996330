//! Row-level authorization: only the user who created a record may change or delete it.
//!
//! Reference rows whose author account was removed have no owner; any
//! administrator may manage those.

use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;

pub fn is_owner(user_id: Uuid, owner_id: Uuid) -> bool {
    user_id == owner_id
}

/// Fails with 403 when `user_id` did not author the record
pub fn ensure_owner(user_id: Uuid, owner_id: Uuid, action: &str, kind: &str) -> Result<(), ApiError> {
    if is_owner(user_id, owner_id) {
        return Ok(());
    }
    tracing::warn!("User {} tried to {} a {} owned by {}", user_id, action, kind, owner_id);
    Err(ApiError::forbidden(format!(
        "Can't {} a {} that is not yours",
        action, kind
    )))
}

/// Like [`ensure_owner`] for reference rows, where a missing owner lets anyone through
pub fn ensure_manageable(
    user_id: Uuid,
    owner_id: Option<Uuid>,
    action: &str,
    kind: &str,
) -> Result<(), ApiError> {
    match owner_id {
        Some(owner_id) => ensure_owner(user_id, owner_id, action, kind),
        None => Ok(()),
    }
}

/// Flags every detail view carries so clients know which controls to offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Permissions {
    pub is_owner: bool,
    pub can_delete: bool,
}

impl Permissions {
    pub fn for_user(user_id: Uuid, owner_id: Uuid) -> Self {
        let is_owner = is_owner(user_id, owner_id);
        Self {
            is_owner,
            can_delete: is_owner,
        }
    }

    /// Orphaned reference rows can be deleted by anyone but belong to no one
    pub fn for_reference(user_id: Uuid, owner_id: Option<Uuid>) -> Self {
        match owner_id {
            Some(owner_id) => Self::for_user(user_id, owner_id),
            None => Self {
                is_owner: false,
                can_delete: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn owner_passes() {
        let id = Uuid::new_v4();
        assert!(ensure_owner(id, id, "delete", "product").is_ok());
        assert_eq!(
            Permissions::for_user(id, id),
            Permissions { is_owner: true, can_delete: true }
        );
    }

    #[test]
    fn stranger_is_forbidden() {
        let err = ensure_owner(Uuid::new_v4(), Uuid::new_v4(), "delete", "ticket").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "Can't delete a ticket that is not yours");
    }

    #[test]
    fn stranger_cannot_delete() {
        let perms = Permissions::for_user(Uuid::new_v4(), Uuid::new_v4());
        assert!(!perms.is_owner);
        assert!(!perms.can_delete);
    }

    #[test]
    fn orphaned_reference_is_manageable_by_anyone() {
        let admin = Uuid::new_v4();
        assert!(ensure_manageable(admin, None, "delete", "product").is_ok());
        assert_eq!(
            Permissions::for_reference(admin, None),
            Permissions { is_owner: false, can_delete: true }
        );
    }

    #[test]
    fn owned_reference_keeps_owner_check() {
        let err = ensure_manageable(Uuid::new_v4(), Some(Uuid::new_v4()), "update", "status")
            .unwrap_err();
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.message(), "Can't update a status that is not yours");
        let owner = Uuid::new_v4();
        assert!(Permissions::for_reference(owner, Some(owner)).is_owner);
    }
}
