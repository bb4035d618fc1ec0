//! Persistence layer for the storefront catalog.
//!
//! Exposes the connection pool, migrations, models/DTOs and the zero-sized
//! repositories. Repository methods that write orderable records or
//! attribute links run the domain validation from `storefront_core`
//! inside the same transaction as the write.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod ordering;
pub mod repositories;

pub use error::DbError;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
