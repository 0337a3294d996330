use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewNote, Note, NoteListing};

const LISTING_SELECT: &str = r#"
    SELECT n.id, n.text,
           n.author_id, u.username AS author_username, u.email AS author_email,
           n.ticket_id, t.title AS ticket_title, p.device,
           n.created_at, n.updated_at
    FROM notes n
    JOIN users u ON u.id = n.author_id
    JOIN tickets t ON t.id = n.ticket_id
    JOIN products p ON p.id = t.product_id
"#;

pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Note>, DatabaseError> {
        let note = sqlx::query_as::<_, Note>("SELECT * FROM notes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(note)
    }

    pub async fn list_by_ticket(&self, ticket_id: Uuid) -> Result<Vec<NoteListing>, DatabaseError> {
        let sql = format!("{LISTING_SELECT} WHERE n.ticket_id = $1 ORDER BY n.updated_at DESC");
        let notes = sqlx::query_as::<_, NoteListing>(&sql)
            .bind(ticket_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }

    /// Matches note text, author username, ticket title or the ticket's product
    pub async fn search(&self, pattern: Option<&str>) -> Result<Vec<NoteListing>, DatabaseError> {
        let sql = format!(
            r#"{LISTING_SELECT}
               WHERE $1::text IS NULL
                  OR n.text ILIKE $1 ESCAPE '\'
                  OR u.username ILIKE $1 ESCAPE '\'
                  OR t.title ILIKE $1 ESCAPE '\'
                  OR p.device ILIKE $1 ESCAPE '\'
               ORDER BY n.updated_at DESC"#
        );
        let notes = sqlx::query_as::<_, NoteListing>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(notes)
    }

    pub async fn create(&self, note: NewNote) -> Result<Note, DatabaseError> {
        let created = sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (id, text, author_id, ticket_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&note.text)
        .bind(note.author_id)
        .bind(note.ticket_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM notes")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
