/// Comment service - handles comment creation, retrieval, editing and deletion
use crate::db::comment_repo;
use crate::error::{AppError, Result};
use crate::metrics::forum::record_mutation;
use crate::middleware::authorize_modification;
use crate::models::{Comment, CreateCommentRequest, DeleteRequest, UpdateCommentRequest};
use crate::SERVICE_NAME;
use db_pool::{acquire_with_metrics, begin_immediate};
use sqlx::SqlitePool;
use validator::Validate;

pub struct CommentService {
    pool: SqlitePool,
}

impl CommentService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Comments on a post, ascending by ID. An unknown or deleted post yields
    /// an empty list.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let comments = comment_repo::find_comments_by_post(&mut conn, post_id).await?;
        Ok(comments)
    }

    /// Get a single comment
    pub async fn get_comment(&self, comment_id: i64) -> Result<Option<Comment>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let comment = comment_repo::find_comment_by_id(&mut conn, comment_id).await?;
        Ok(comment)
    }

    /// Create a new comment
    pub async fn create_comment(&self, req: &CreateCommentRequest) -> Result<Comment> {
        req.validate()?;

        let result = self.insert_comment(req).await;
        record_mutation("comment", "create", &result);
        result
    }

    async fn insert_comment(&self, req: &CreateCommentRequest) -> Result<Comment> {
        let mut tx = begin_immediate(&self.pool).await?;

        let comment_id =
            comment_repo::insert_comment(&mut tx, req.post_id, req.user_id, &req.content).await?;

        let comment = comment_repo::find_comment_by_id(&mut tx, comment_id)
            .await?
            .ok_or_else(|| {
                AppError::Internal(format!("comment {} vanished after insert", comment_id))
            })?;

        tx.commit().await?;

        tracing::info!(
            comment_id = comment.id,
            post_id = comment.post_id,
            author_id = comment.author_id,
            "comment created"
        );

        Ok(comment)
    }

    /// Update comment content
    pub async fn update_comment(&self, req: &UpdateCommentRequest) -> Result<Comment> {
        req.validate()?;

        let result = self.apply_update(req).await;
        record_mutation("comment", "update", &result);
        result
    }

    async fn apply_update(&self, req: &UpdateCommentRequest) -> Result<Comment> {
        let mut tx = begin_immediate(&self.pool).await?;

        let comment = comment_repo::find_comment_by_id(&mut tx, req.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {}", req.id)))?;

        authorize_modification(&mut tx, req.user_id, &comment).await?;

        comment_repo::update_comment(&mut tx, comment.id, &req.content).await?;

        let updated = comment_repo::find_comment_by_id(&mut tx, comment.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {}", comment.id)))?;

        tx.commit().await?;

        tracing::info!(comment_id = updated.id, actor_id = req.user_id, "comment updated");

        Ok(updated)
    }

    /// Delete a comment
    pub async fn delete_comment(&self, req: &DeleteRequest) -> Result<()> {
        req.validate()?;

        let result = self.apply_delete(req).await;
        record_mutation("comment", "delete", &result);
        result
    }

    async fn apply_delete(&self, req: &DeleteRequest) -> Result<()> {
        let mut tx = begin_immediate(&self.pool).await?;

        let comment = comment_repo::find_comment_by_id(&mut tx, req.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("comment {}", req.id)))?;

        authorize_modification(&mut tx, req.user_id, &comment).await?;

        if comment_repo::delete_comment(&mut tx, comment.id).await? == 0 {
            return Err(AppError::NotFound(format!("comment {}", comment.id)));
        }

        tx.commit().await?;

        tracing::info!(comment_id = comment.id, actor_id = req.user_id, "comment deleted");

        Ok(())
    }
}
