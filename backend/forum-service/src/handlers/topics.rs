use crate::error::Result;
use crate::services::TopicService;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

/// `GET /topics`
pub async fn list_topics(pool: web::Data<SqlitePool>) -> Result<HttpResponse> {
    let service = TopicService::new((**pool).clone());
    let topics = service.list_topics().await?;

    Ok(HttpResponse::Ok().json(topics))
}
