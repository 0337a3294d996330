use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewTicket, Ticket, TicketChanges, TicketListing};

const LISTING_SELECT: &str = r#"
    SELECT t.id, t.title, t.description,
           t.author_id, u.username AS author_username,
           t.product_id, p.device,
           t.status_id, s.type AS status_type,
           t.created_at, t.updated_at
    FROM tickets t
    JOIN users u ON u.id = t.author_id
    JOIN products p ON p.id = t.product_id
    JOIN statuses s ON s.id = t.status_id
"#;

pub struct TicketRepository {
    pool: PgPool,
}

impl TicketRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Ticket>, DatabaseError> {
        let ticket = sqlx::query_as::<_, Ticket>("SELECT * FROM tickets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    pub async fn find_listing(&self, id: Uuid) -> Result<Option<TicketListing>, DatabaseError> {
        let sql = format!("{LISTING_SELECT} WHERE t.id = $1");
        let ticket = sqlx::query_as::<_, TicketListing>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ticket)
    }

    /// Tickets submitted by one user, most recently updated first
    pub async fn list_by_author(&self, author_id: Uuid) -> Result<Vec<TicketListing>, DatabaseError> {
        let sql = format!("{LISTING_SELECT} WHERE t.author_id = $1 ORDER BY t.updated_at DESC");
        let tickets = sqlx::query_as::<_, TicketListing>(&sql)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    pub async fn search(&self, pattern: Option<&str>) -> Result<Vec<TicketListing>, DatabaseError> {
        let sql = format!(
            r#"{LISTING_SELECT}
               WHERE $1::text IS NULL
                  OR t.title ILIKE $1 ESCAPE '\'
                  OR t.description ILIKE $1 ESCAPE '\'
                  OR u.username ILIKE $1 ESCAPE '\'
                  OR p.device ILIKE $1 ESCAPE '\'
                  OR s.type ILIKE $1 ESCAPE '\'
               ORDER BY t.updated_at DESC"#
        );
        let tickets = sqlx::query_as::<_, TicketListing>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(tickets)
    }

    pub async fn create(&self, ticket: NewTicket) -> Result<Ticket, DatabaseError> {
        let created = sqlx::query_as::<_, Ticket>(
            r#"
            INSERT INTO tickets (id, title, description, author_id, product_id, status_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.author_id)
        .bind(ticket.product_id)
        .bind(ticket.status_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, changes: TicketChanges) -> Result<Option<Ticket>, DatabaseError> {
        let updated = sqlx::query_as::<_, Ticket>(
            r#"
            UPDATE tickets
            SET title = $2, description = $3, product_id = $4, status_id = $5, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.title)
        .bind(&changes.description)
        .bind(changes.product_id)
        .bind(changes.status_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM tickets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
