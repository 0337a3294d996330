use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author_id: Uuid,
    pub product_id: Uuid,
    pub status_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Ticket joined with its author, product and status for list and detail views
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TicketListing {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub product_id: Uuid,
    pub device: String,
    pub status_id: Uuid,
    pub status_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TicketListing {
    /// Timestamp shown in listings: the last update once the ticket has been edited
    pub fn last_activity(&self) -> DateTime<Utc> {
        if self.updated_at != self.created_at {
            self.updated_at
        } else {
            self.created_at
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub author_id: Uuid,
    pub product_id: Uuid,
    pub status_id: Uuid,
}

/// Full replacement of the editable ticket fields
#[derive(Debug, Clone)]
pub struct TicketChanges {
    pub title: String,
    pub description: String,
    pub product_id: Uuid,
    pub status_id: Uuid,
}
