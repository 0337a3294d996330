use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Lookup;

/// Company department. A user belongs to exactly one service by name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub name: String,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lookup for Service {
    const KIND: &'static str = "service";
    const TITLE: &'static str = "Service";
    const TABLE: &'static str = "services";
    const LABEL: &'static str = "name";
    const OWNER: &'static str = "author_id";

    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.author_id
    }
}
