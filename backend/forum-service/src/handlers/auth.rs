/// Login handler - username-only identification, no credentials
use crate::error::Result;
use crate::models::LoginRequest;
use crate::services::UserDirectory;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

/// `POST /login {username}` → the existing or newly created user
pub async fn login(
    pool: web::Data<SqlitePool>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let directory = UserDirectory::new((**pool).clone());
    let user = directory.resolve_or_create(&req.username).await?;

    Ok(HttpResponse::Ok().json(user))
}
