use crate::models::Comment;
use sqlx::SqliteConnection;

/// Comments on a post, oldest first, with author usernames
pub async fn find_comments_by_post(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.post_id, c.user_id AS author_id, c.content,
               u.username AS author
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.post_id = ?1
        ORDER BY c.id ASC
        "#,
    )
    .bind(post_id)
    .fetch_all(&mut *conn)
    .await
}

/// Get a single comment by ID
pub async fn find_comment_by_id(
    conn: &mut SqliteConnection,
    comment_id: i64,
) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(
        r#"
        SELECT c.id, c.post_id, c.user_id AS author_id, c.content,
               u.username AS author
        FROM comments c
        JOIN users u ON u.id = c.user_id
        WHERE c.id = ?1
        "#,
    )
    .bind(comment_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Create a new comment on a post and return its ID
pub async fn insert_comment(
    conn: &mut SqliteConnection,
    post_id: i64,
    user_id: i64,
    content: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO comments (post_id, user_id, content)
        VALUES (?1, ?2, ?3)
        RETURNING id
        "#,
    )
    .bind(post_id)
    .bind(user_id)
    .bind(content)
    .fetch_one(&mut *conn)
    .await
}

/// Update comment content
pub async fn update_comment(
    conn: &mut SqliteConnection,
    comment_id: i64,
    content: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE comments SET content = ?1 WHERE id = ?2")
        .bind(content)
        .bind(comment_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete_comment(
    conn: &mut SqliteConnection,
    comment_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?1")
        .bind(comment_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Remove every comment under a post; returns how many were removed
pub async fn delete_comments_by_post(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE post_id = ?1")
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Count comments for a post
pub async fn count_comments_by_post(
    conn: &mut SqliteConnection,
    post_id: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE post_id = ?1")
        .bind(post_id)
        .fetch_one(&mut *conn)
        .await
}

pub async fn count_comments(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
        .fetch_one(&mut *conn)
        .await
}
