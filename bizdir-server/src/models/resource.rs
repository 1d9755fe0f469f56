//! The `Resource` trait shared by businesses, reviews and photos

use bizdir_core::Schema;
use serde::Serialize;
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::FromRow;

use super::validation::{check_body, ValidationError};

/// A table exposed over HTTP: its row type, name and field schema.
///
/// Schema fields are the table's writable columns; `id` is generated.
pub trait Resource:
    Serialize + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static
{
    /// Singular name used in messages and link keys ("business")
    const NAME: &'static str;

    /// Table name, also the collection path segment ("businesses")
    const TABLE: &'static str;

    /// Allow-list of writable fields.
    fn schema() -> &'static Schema;

    /// Canonical path of one row.
    fn path(id: i32) -> String {
        format!("/{}/{}", Self::TABLE, id)
    }

    /// Check a create/replace body against the schema.
    fn check(candidate: &Value) -> Result<(), ValidationError> {
        check_body(Self::NAME, Self::schema(), candidate)
    }
}
