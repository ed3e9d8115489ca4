use crate::models::Topic;
use sqlx::SqliteConnection;

/// All topics in creation order
pub async fn list_topics(conn: &mut SqliteConnection) -> Result<Vec<Topic>, sqlx::Error> {
    sqlx::query_as::<_, Topic>(
        r#"
        SELECT id, title, description
        FROM topics
        ORDER BY id ASC
        "#,
    )
    .fetch_all(&mut *conn)
    .await
}

pub async fn insert_topic(
    conn: &mut SqliteConnection,
    title: &str,
    description: &str,
) -> Result<Topic, sqlx::Error> {
    sqlx::query_as::<_, Topic>(
        r#"
        INSERT INTO topics (title, description)
        VALUES (?1, ?2)
        RETURNING id, title, description
        "#,
    )
    .bind(title)
    .bind(description)
    .fetch_one(&mut *conn)
    .await
}

pub async fn count_topics(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM topics")
        .fetch_one(&mut *conn)
        .await
}
