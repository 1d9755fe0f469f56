//! Repository implementations for database access
//!
//! One generic repository serves every [`Resource`](crate::models::Resource):
//! - Writes extract schema fields right before building SQL
//! - Row values are coerced to column types by `jsonb_populate_record`
//! - Constraint failures are classified, not string-matched by callers

pub mod resource;
pub mod related;

pub use resource::ResourceRepo;

use sqlx::error::DatabaseError;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Unique constraint violation
    #[error("conflict: {0}")]
    Conflict(String),

    /// Data exception or other integrity violation (bad literal, NULL in
    /// NOT NULL column, dangling foreign key)
    #[error("rejected by database: {0}")]
    Rejected(String),
}

impl DbError {
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let classified = match &err {
            sqlx::Error::Database(db) => classify(db.as_ref()),
            _ => None,
        };
        classified.unwrap_or(Self::Sqlx(err))
    }
}

/// Map SQLSTATE classes 22 (data exception) and 23 (integrity violation).
fn classify(db: &dyn DatabaseError) -> Option<DbError> {
    if db.is_unique_violation() {
        return Some(DbError::Conflict(db.message().to_owned()));
    }

    let code = db.code()?;
    if code.starts_with("22") || code.starts_with("23") {
        Some(DbError::Rejected(db.message().to_owned()))
    } else {
        None
    }
}
