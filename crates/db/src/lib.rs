//! PostgreSQL persistence for entrepreneurs and assignments.
//!
//! `repositories` holds zero-sized `*Repo` structs with `&PgPool` methods;
//! [`pg::PgStandRepository`] adapts them to the core storage trait.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod pg;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
}

/// Run `SELECT 1` to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
