use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::Lookup;

/// Repository shared by all reference-data tables.
///
/// Table and column names come from `Lookup` constants, never from input,
/// so formatting them into SQL is safe.
pub struct LookupRepository<T> {
    pool: PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<T: Lookup> LookupRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// All rows ordered by label, optionally filtered by an ILIKE pattern
    pub async fn list(&self, pattern: Option<&str>) -> Result<Vec<T>, DatabaseError> {
        let sql = format!(
            r#"SELECT * FROM "{table}"
               WHERE $1::text IS NULL OR "{label}" ILIKE $1 ESCAPE '\'
               ORDER BY "{label}" ASC"#,
            table = T::TABLE,
            label = T::LABEL,
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let sql = format!(r#"SELECT * FROM "{}" WHERE id = $1"#, T::TABLE);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_label(&self, label: &str) -> Result<Option<T>, DatabaseError> {
        let sql = format!(r#"SELECT * FROM "{}" WHERE "{}" = $1"#, T::TABLE, T::LABEL);
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(label)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, label: &str, owner_id: Uuid) -> Result<T, DatabaseError> {
        let sql = format!(
            r#"INSERT INTO "{}" (id, "{}", "{}") VALUES ($1, $2, $3) RETURNING *"#,
            T::TABLE,
            T::LABEL,
            T::OWNER,
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(Uuid::new_v4())
            .bind(label)
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn rename(&self, id: Uuid, label: &str) -> Result<Option<T>, DatabaseError> {
        let sql = format!(
            r#"UPDATE "{}" SET "{}" = $2, updated_at = now() WHERE id = $1 RETURNING *"#,
            T::TABLE,
            T::LABEL,
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .bind(label)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Returns false when no row had this id
    pub async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let sql = format!(r#"DELETE FROM "{}" WHERE id = $1"#, T::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        let sql = format!(r#"SELECT COUNT(*) FROM "{}""#, T::TABLE);
        let (count,): (i64,) = sqlx::query_as(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }
}
