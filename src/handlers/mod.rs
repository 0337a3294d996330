// handlers/mod.rs - 3-Tier Handler Architecture
//
// Public (no auth) → Protected (JWT auth) → Elevated (administrator JWT)

pub mod public;    // Tier 1: No authentication required (/, /health, /auth/*)
pub mod protected; // Tier 2: JWT authentication required (/api/*)
pub mod elevated;  // Tier 3: Administrator required (/api/admin/*)

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::User;
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::middleware::AuthUser;

/// Body returned by every delete endpoint
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub id: Uuid,
    pub deleted: bool,
    /// Where a browser client should go next
    pub redirect_to: &'static str,
}

impl Deleted {
    pub fn new(id: Uuid, redirect_to: &'static str) -> Self {
        Self {
            id,
            deleted: true,
            redirect_to,
        }
    }
}

/// Load the caller's row. A valid token for a deleted account is treated as unauthenticated.
pub async fn current_user(pool: &PgPool, auth_user: &AuthUser) -> Result<User, ApiError> {
    UserRepository::new(pool.clone())
        .find(auth_user.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Token for missing user {} ({})", auth_user.username, auth_user.user_id);
            ApiError::unauthorized("User no longer exists")
        })
}
