/// Post service - handles post creation, retrieval, editing and deletion
use crate::db::{comment_repo, post_repo};
use crate::error::{AppError, Result};
use crate::metrics::forum::record_mutation;
use crate::middleware::authorize_modification;
use crate::models::{CreatePostRequest, DeleteRequest, Post, UpdatePostRequest};
use crate::SERVICE_NAME;
use db_pool::{acquire_with_metrics, begin_immediate};
use sqlx::SqlitePool;
use validator::Validate;

pub struct PostService {
    pool: SqlitePool,
}

impl PostService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Posts under a topic, ascending by ID. An unknown topic yields an empty list.
    pub async fn list_posts(&self, topic_id: i64) -> Result<Vec<Post>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let posts = post_repo::find_posts_by_topic(&mut conn, topic_id).await?;
        Ok(posts)
    }

    /// Get a post by ID
    pub async fn get_post(&self, post_id: i64) -> Result<Option<Post>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let post = post_repo::find_post_by_id(&mut conn, post_id).await?;
        Ok(post)
    }

    /// Create a new post
    ///
    /// A topic or author that does not exist surfaces as `AppError::Referential`.
    pub async fn create_post(&self, req: &CreatePostRequest) -> Result<Post> {
        req.validate()?;

        let result = self.insert_post(req).await;
        record_mutation("post", "create", &result);
        result
    }

    async fn insert_post(&self, req: &CreatePostRequest) -> Result<Post> {
        let mut tx = begin_immediate(&self.pool).await?;

        let post_id = post_repo::insert_post(
            &mut tx,
            req.topic_id,
            req.user_id,
            &req.title,
            &req.content,
        )
        .await?;

        let post = post_repo::find_post_by_id(&mut tx, post_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("post {} vanished after insert", post_id)))?;

        tx.commit().await?;

        tracing::info!(
            post_id = post.id,
            topic_id = post.topic_id,
            author_id = post.author_id,
            "post created"
        );

        Ok(post)
    }

    /// Overwrite a post's title and content.
    ///
    /// Existence check, authorization and the write share one transaction.
    pub async fn update_post(&self, req: &UpdatePostRequest) -> Result<Post> {
        req.validate()?;

        let result = self.apply_update(req).await;
        record_mutation("post", "update", &result);
        result
    }

    async fn apply_update(&self, req: &UpdatePostRequest) -> Result<Post> {
        let mut tx = begin_immediate(&self.pool).await?;

        let post = post_repo::find_post_by_id(&mut tx, req.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", req.id)))?;

        authorize_modification(&mut tx, req.user_id, &post).await?;

        post_repo::update_post(&mut tx, post.id, &req.title, &req.content).await?;

        let updated = post_repo::find_post_by_id(&mut tx, post.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post.id)))?;

        tx.commit().await?;

        tracing::info!(post_id = updated.id, actor_id = req.user_id, "post updated");

        Ok(updated)
    }

    /// Delete a post together with all of its comments.
    ///
    /// Both deletes commit or roll back as one unit; comments never outlive
    /// their post.
    pub async fn delete_post(&self, req: &DeleteRequest) -> Result<()> {
        req.validate()?;

        let result = self.cascade_delete(req).await;
        record_mutation("post", "delete", &result);
        result
    }

    async fn cascade_delete(&self, req: &DeleteRequest) -> Result<()> {
        let mut tx = begin_immediate(&self.pool).await?;

        let post = post_repo::find_post_by_id(&mut tx, req.id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", req.id)))?;

        authorize_modification(&mut tx, req.user_id, &post).await?;

        let removed_comments = comment_repo::delete_comments_by_post(&mut tx, post.id).await?;
        let removed = post_repo::delete_post(&mut tx, post.id).await?;
        if removed == 0 {
            return Err(AppError::NotFound(format!("post {}", post.id)));
        }

        tx.commit().await?;

        tracing::info!(
            post_id = post.id,
            actor_id = req.user_id,
            removed_comments,
            "post deleted"
        );

        Ok(())
    }
}
