use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::Lookup;

/// Device or application a ticket can be filed against.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub device: String,
    pub author_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lookup for Product {
    const KIND: &'static str = "product";
    const TITLE: &'static str = "Product";
    const TABLE: &'static str = "products";
    const LABEL: &'static str = "device";
    const OWNER: &'static str = "author_id";

    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.device
    }

    fn owner_id(&self) -> Option<Uuid> {
        self.author_id
    }
}
