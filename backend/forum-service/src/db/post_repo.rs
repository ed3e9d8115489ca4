use crate::models::Post;
use sqlx::SqliteConnection;

/// Posts under a topic, oldest first, with author usernames
pub async fn find_posts_by_topic(
    conn: &mut SqliteConnection,
    topic_id: i64,
) -> Result<Vec<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.topic_id, p.user_id AS author_id, p.title, p.content,
               u.username AS author
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE p.topic_id = ?1
        ORDER BY p.id ASC
        "#,
    )
    .bind(topic_id)
    .fetch_all(&mut *conn)
    .await
}

/// Find a post by ID
pub async fn find_post_by_id(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT p.id, p.topic_id, p.user_id AS author_id, p.title, p.content,
               u.username AS author
        FROM posts p
        JOIN users u ON u.id = p.user_id
        WHERE p.id = ?1
        "#,
    )
    .bind(post_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Insert a post and return its new ID. Dangling topic/user IDs fail with a
/// foreign key violation.
pub async fn insert_post(
    conn: &mut SqliteConnection,
    topic_id: i64,
    user_id: i64,
    title: &str,
    content: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO posts (topic_id, user_id, title, content)
        VALUES (?1, ?2, ?3, ?4)
        RETURNING id
        "#,
    )
    .bind(topic_id)
    .bind(user_id)
    .bind(title)
    .bind(content)
    .fetch_one(&mut *conn)
    .await
}

/// Overwrite title and content; topic and author never change
pub async fn update_post(
    conn: &mut SqliteConnection,
    post_id: i64,
    title: &str,
    content: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE posts
        SET title = ?1, content = ?2
        WHERE id = ?3
        "#,
    )
    .bind(title)
    .bind(content)
    .bind(post_id)
    .execute(&mut *conn)
    .await?;

    Ok(result.rows_affected())
}

/// Hard delete a single post row. Its comments must already be gone.
pub async fn delete_post(conn: &mut SqliteConnection, post_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM posts WHERE id = ?1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn count_posts(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
        .fetch_one(&mut *conn)
        .await
}
