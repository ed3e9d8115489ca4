/// Configuration management for forum-service
///
/// Everything is read from environment variables (optionally seeded from a
/// `.env` file by `main`).
use db_pool::env_utils::{env_flag, env_or};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    pub host: String,
    pub port: u16,
    /// HTTP worker threads
    pub workers: usize,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins, `*` for any
    pub allowed_origins: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite URL, e.g. `sqlite://forum.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
}

/// Startup seeding. Base users and topics are always ensured; the demo
/// posts and comments only when `demo_content` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub demo_content: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let production = app_env.eq_ignore_ascii_case("production");

        let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value,
            Err(_) if production => {
                return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
            }
            Err(_) => "*".to_string(),
        };
        if production && allowed_origins.trim() == "*" {
            return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
        }

        let workers = env_or("FORUM_SERVICE_WORKERS", 4usize);
        if workers == 0 {
            return Err("FORUM_SERVICE_WORKERS must be at least 1".to_string());
        }

        Ok(Config {
            app: AppConfig {
                env: app_env,
                host: std::env::var("FORUM_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_or("FORUM_SERVICE_PORT", 8080),
                workers,
            },
            cors: CorsConfig { allowed_origins },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "sqlite://forum.db".to_string()),
                max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
            },
            seed: SeedConfig {
                demo_content: env_flag("FORUM_SEED_DEMO_DATA", true),
            },
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}
