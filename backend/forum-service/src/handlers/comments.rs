/// Comment handlers - HTTP endpoints for comment operations
use crate::error::Result;
use crate::models::{CreateCommentRequest, DeleteRequest, ListCommentsQuery, UpdateCommentRequest};
use crate::services::CommentService;
use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

/// `GET /comments?postId=N`
pub async fn list_comments(
    pool: web::Data<SqlitePool>,
    query: web::Query<ListCommentsQuery>,
) -> Result<HttpResponse> {
    let post_id = query.post_id()?;
    let service = CommentService::new((**pool).clone());
    let comments = service.list_comments(post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// `POST /comments`
pub async fn create_comment(
    pool: web::Data<SqlitePool>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.create_comment(&req).await?;

    Ok(HttpResponse::Created().json(comment))
}

/// `PUT /comments`
pub async fn update_comment(
    pool: web::Data<SqlitePool>,
    req: web::Json<UpdateCommentRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    let comment = service.update_comment(&req).await?;

    Ok(HttpResponse::Ok().json(comment))
}

/// `DELETE /comments`
pub async fn delete_comment(
    pool: web::Data<SqlitePool>,
    req: web::Json<DeleteRequest>,
) -> Result<HttpResponse> {
    let service = CommentService::new((**pool).clone());
    service.delete_comment(&req).await?;

    Ok(HttpResponse::NoContent().finish())
}
