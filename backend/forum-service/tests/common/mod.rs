#![allow(dead_code)]

use db_pool::{create_pool, DbConfig};
use forum_service::{init_database, SERVICE_NAME};
use sqlx::SqlitePool;
use std::path::Path;

/// Seeded ids (insertion order of the fixture data).
pub const ALICE: i64 = 1;
pub const BOB: i64 = 2;
pub const GENERAL: i64 = 1;
pub const HOMEWORK: i64 = 2;

/// Fresh in-memory database, migrated and seeded.
pub async fn setup_pool(seed_demo_content: bool) -> SqlitePool {
    let pool = create_pool(DbConfig::in_memory(SERVICE_NAME))
        .await
        .expect("create in-memory pool");
    init_database(&pool, seed_demo_content)
        .await
        .expect("init database");
    pool
}

/// File-backed database so several connections can race each other.
pub async fn setup_file_pool(path: &Path, max_connections: u32) -> SqlitePool {
    let config = DbConfig {
        service_name: SERVICE_NAME.to_string(),
        database_url: format!("sqlite://{}", path.display()),
        max_connections,
        ..DbConfig::default()
    };
    let pool = create_pool(config).await.expect("create file pool");
    init_database(&pool, false).await.expect("init database");
    pool
}

pub async fn count(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .expect("count rows")
}
