use crate::models::User;
use sqlx::SqliteConnection;

/// Find a user by exact (case-sensitive) username
pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, is_moderator
        FROM users
        WHERE username = ?1
        "#,
    )
    .bind(username)
    .fetch_optional(&mut *conn)
    .await
}

/// Find a user by ID
pub async fn find_by_id(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, is_moderator
        FROM users
        WHERE id = ?1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *conn)
    .await
}

/// Insert a user. Fails with a unique violation if the username is taken.
pub async fn insert_user(
    conn: &mut SqliteConnection,
    username: &str,
    is_moderator: bool,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, is_moderator)
        VALUES (?1, ?2)
        RETURNING id, username, is_moderator
        "#,
    )
    .bind(username)
    .bind(is_moderator)
    .fetch_one(&mut *conn)
    .await
}

/// Moderator flag of a user, `None` if the user does not exist
pub async fn moderator_flag(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<Option<bool>, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT is_moderator FROM users WHERE id = ?1")
        .bind(user_id)
        .fetch_optional(&mut *conn)
        .await
}

pub async fn count_users(conn: &mut SqliteConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(&mut *conn)
        .await
}
