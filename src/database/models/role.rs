use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Lookup;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Role {
    pub id: Uuid,
    pub role_type: String,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lookup for Role {
    const KIND: &'static str = "role";
    const TITLE: &'static str = "Role";
    const TABLE: &'static str = "roles";
    const LABEL: &'static str = "role_type";
    const OWNER: &'static str = "author_id";

    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.role_type
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.author_id
    }
}
