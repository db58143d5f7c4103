//! Database module
//!
//! This module handles database connections, migrations, seeding, and repositories.

pub mod connection;
pub mod repositories;
pub mod seed;

use sqlx::SqlitePool;

pub use connection::*;

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
