use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize, Debug)]
pub struct ComponentCheck {
    pub status: ComponentStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

#[derive(Serialize, Debug)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub status: ComponentStatus,
    pub checks: HashMap<String, ComponentCheck>,
    pub timestamp: String,
}

/// `GET /health` → plain `OK`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("OK\n")
}

async fn check_database(pool: &SqlitePool) -> ComponentCheck {
    let start = Instant::now();
    let result = sqlx::query("SELECT 1").fetch_one(pool).await;
    let latency_ms = Some(start.elapsed().as_millis() as u64);

    match result {
        Ok(_) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "Database connection successful".to_string(),
            latency_ms,
        },
        Err(e) => ComponentCheck {
            status: ComponentStatus::Unhealthy,
            message: format!("Database query failed: {}", e),
            latency_ms,
        },
    }
}

/// `GET /health/ready` → 200 when the database answers, 503 otherwise
pub async fn readiness(pool: web::Data<SqlitePool>) -> HttpResponse {
    let database = check_database(pool.get_ref()).await;
    let ready = database.status == ComponentStatus::Healthy;
    if !ready {
        tracing::warn!(message = %database.message, "readiness check failed");
    }

    let mut checks = HashMap::new();
    checks.insert("database".to_string(), database);

    let body = ReadinessResponse {
        ready,
        status: if ready {
            ComponentStatus::Healthy
        } else {
            ComponentStatus::Unhealthy
        },
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

/// `GET /health/live`
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "alive": true,
        "service": crate::SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
