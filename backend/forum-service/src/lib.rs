/// Forum Service Library
///
/// Backend for a small discussion forum: users identified by username,
/// topics, posts and comments, with author-or-moderator edit rights.
///
/// # Modules
///
/// - `config`: environment configuration
/// - `db`: migrations, seeding and per-table repositories
/// - `error`: error types and HTTP mapping
/// - `handlers`: HTTP request handlers and route table
/// - `metrics`: Prometheus collectors
/// - `middleware`: authorization rules and request timing
/// - `models`: entities and request shapes
/// - `services`: user directory and content store
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use sqlx::SqlitePool;

/// Label used for pool metrics and service identification.
pub const SERVICE_NAME: &str = "forum-service";

/// Apply migrations, then seed base users/topics (and demo content if asked).
pub async fn init_database(pool: &SqlitePool, seed_demo_content: bool) -> Result<db::SeedReport> {
    db::run_migrations(pool).await?;
    let report = db::seed_if_empty(pool, seed_demo_content).await?;

    tracing::info!(
        users = report.users,
        topics = report.topics,
        posts = report.posts,
        comments = report.comments,
        "database initialized"
    );

    Ok(report)
}
