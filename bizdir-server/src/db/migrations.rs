//! Table and index creation
//!
//! Every statement is idempotent, so this runs on each server start.

use sqlx::PgPool;

use super::DbError;

/// Create all tables and indexes that do not exist yet
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS businesses (
            id SERIAL PRIMARY KEY,
            ownerid INTEGER NOT NULL,
            name VARCHAR(255) NOT NULL,
            address VARCHAR(255) NOT NULL,
            city VARCHAR(255) NOT NULL,
            state VARCHAR(2) NOT NULL,
            zip VARCHAR(5) NOT NULL,
            phone VARCHAR(15) NOT NULL,
            category VARCHAR(255) NOT NULL,
            subcategory VARCHAR(255) NOT NULL,
            website VARCHAR(255),
            email VARCHAR(255)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One review per user per business
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id SERIAL PRIMARY KEY,
            userid INTEGER NOT NULL,
            businessid INTEGER NOT NULL REFERENCES businesses(id) ON DELETE CASCADE,
            dollars INTEGER NOT NULL,
            stars INTEGER NOT NULL,
            review TEXT,
            UNIQUE (userid, businessid)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS photos (
            id SERIAL PRIMARY KEY,
            userid INTEGER NOT NULL,
            businessid INTEGER NOT NULL REFERENCES businesses(id) ON DELETE CASCADE,
            caption VARCHAR(255)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_businesses_ownerid ON businesses(ownerid)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_reviews_businessid ON reviews(businessid)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_userid ON photos(userid)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_photos_businessid ON photos(businessid)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn migrations_are_idempotent() {
        let pool = crate::db::test_pool().await;

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");
    }
}
