/// Database access layer
///
/// Repository functions take `&mut SqliteConnection` so the same query runs
/// either on a pooled connection or inside a transaction (`&mut tx`).
pub mod comment_repo;
pub mod post_repo;
pub mod seed;
pub mod topic_repo;
pub mod user_repo;

pub use seed::{seed_if_empty, SeedReport};

use sqlx::SqlitePool;

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    tracing::debug!("Running forum schema migrations");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed successfully");
    Ok(())
}
