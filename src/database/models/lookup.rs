use serde::Serialize;
use sqlx::{postgres::PgRow, FromRow};
use uuid::Uuid;

/// Administrator-managed reference record: one unique label plus the user who created it.
///
/// Products, services, roles and statuses differ only in table and column names,
/// so repositories and handlers are written once against this trait.
pub trait Lookup: for<'r> FromRow<'r, PgRow> + Serialize + Send + Sync + Unpin + 'static {
    /// Lowercase singular used in messages, e.g. "product"
    const KIND: &'static str;
    /// Capitalized form for the start of a sentence
    const TITLE: &'static str;
    const TABLE: &'static str;
    /// Unique label column; also the request body field name
    const LABEL: &'static str;
    /// Column holding the creating user's id
    const OWNER: &'static str;

    fn id(&self) -> Uuid;
    fn label(&self) -> &str;
    fn owner_id(&self) -> Option<Uuid>;
}
