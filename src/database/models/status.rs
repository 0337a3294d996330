use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Lookup;

/// Ticket status such as "new", "open" or "closed". Owned by the technician who defined it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Status {
    pub id: Uuid,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub status_type: String,
    pub technician_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lookup for Status {
    const KIND: &'static str = "status";
    const TITLE: &'static str = "Status";
    const TABLE: &'static str = "statuses";
    const LABEL: &'static str = "type";
    const OWNER: &'static str = "technician_id";

    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.status_type
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.technician_id
    }
}
