//! Postgres pool for the directory tables
//!
//! Requests wait at most [`ACQUIRE_TIMEOUT`] for a connection, so a dead
//! database turns into fast 500/503 responses instead of hung requests.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::DbError;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Longest a request waits for a free connection.
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Pool options shared by eager and lazy pools. Zero connections is
/// bumped to one.
pub fn pool_options(max_connections: u32) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
}

/// Connect to `database_url`, failing now if the database is unreachable.
///
/// ```ignore
/// let pool = connect_pool("postgres://localhost/bizdir", DEFAULT_MAX_CONNECTIONS).await?;
/// ```
pub async fn connect_pool(database_url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "Connecting to database");
    pool_options(max_connections).connect(database_url).await
}

/// Round-trip a trivial query to prove the database answers.
pub async fn ping(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
