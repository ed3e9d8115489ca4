/// Topic service - topics are seeded at startup and only read afterwards
use crate::db::topic_repo;
use crate::error::Result;
use crate::models::Topic;
use crate::SERVICE_NAME;
use db_pool::acquire_with_metrics;
use sqlx::SqlitePool;

pub struct TopicService {
    pool: SqlitePool,
}

impl TopicService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All topics, ascending by ID
    pub async fn list_topics(&self) -> Result<Vec<Topic>> {
        let mut conn = acquire_with_metrics(&self.pool, SERVICE_NAME).await?;
        let topics = topic_repo::list_topics(&mut conn).await?;
        Ok(topics)
    }
}
