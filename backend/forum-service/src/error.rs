/// Error types for Forum Service
///
/// Every core operation reports exactly one of these kinds to its caller.
/// `ResponseError` maps them onto HTTP status codes for the request surface.
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for forum-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing input; the caller can fix the request
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Actor is known but may not perform the action
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A referenced topic/post/user does not exist
    #[error("Invalid reference: {0}")]
    Referential(String),

    /// A uniqueness constraint was violated by a concurrent writer
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::Referential(_) => StatusCode::BAD_REQUEST,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::Storage(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = match self {
            AppError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                "Storage error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal failure");
                "Internal error".to_string()
            }
            other => other.to_string(),
        };

        HttpResponse::build(status).json(serde_json::json!({
            "error": error_msg,
            "status": status.as_u16(),
        }))
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            match db_err.kind() {
                sqlx::error::ErrorKind::ForeignKeyViolation => {
                    return AppError::Referential(db_err.message().to_string());
                }
                sqlx::error::ErrorKind::UniqueViolation => {
                    return AppError::Conflict(db_err.message().to_string());
                }
                _ => {}
            }
        }
        AppError::Storage(err)
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::Internal(format!("migration failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl AppError {
    /// True for storage failures caused by a unique constraint.
    pub fn is_conflict(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}
