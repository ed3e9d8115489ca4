/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::models::{CreatePostRequest, DeleteRequest, ListPostsQuery, UpdatePostRequest};
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

/// `GET /posts?topicId=N`
pub async fn list_posts(
    pool: web::Data<SqlitePool>,
    query: web::Query<ListPostsQuery>,
) -> Result<HttpResponse> {
    let topic_id = query.topic_id()?;
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts(topic_id).await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// `POST /posts`
pub async fn create_post(
    pool: web::Data<SqlitePool>,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.create_post(&req).await?;

    Ok(HttpResponse::Created().json(post))
}

/// `PUT /posts`
pub async fn update_post(
    pool: web::Data<SqlitePool>,
    req: web::Json<UpdatePostRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let post = service.update_post(&req).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// `DELETE /posts`
pub async fn delete_post(
    pool: web::Data<SqlitePool>,
    req: web::Json<DeleteRequest>,
) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    service.delete_post(&req).await?;

    Ok(HttpResponse::NoContent().finish())
}
