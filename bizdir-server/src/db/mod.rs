//! Database layer - connection pool, migrations and repositories
//!
//! # Design Principles
//!
//! - Connection pool (max 5 connections by default) - no Arc<Mutex<Connection>>
//! - Writes only ever carry schema-declared columns, extracted in the repository
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{connect_pool, ping, pool_options, ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
pub use repos::{DbError, ResourceRepo};

/// Pool on `DATABASE_URL` with all tables created.
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = connect_pool(&url, DEFAULT_MAX_CONNECTIONS)
        .await
        .expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    pool
}
