/// Authorization rules for forum content.
///
/// One rule covers posts and comments alike: the actor may modify or delete an
/// item iff they authored it or they are a moderator. Either condition alone is
/// sufficient. There are no other roles.
///
/// Callers must establish that the target exists (and report `NotFound`)
/// before asking; an absent item cannot be authorized against.
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::metrics::forum::AUTHORIZATION_DENIALS_TOTAL;
use crate::models::{Comment, Post};
use sqlx::SqliteConnection;

/// Content that has exactly one, immutable author.
pub trait Authored {
    fn author_id(&self) -> i64;

    /// Entity label used in messages and metrics
    fn kind() -> &'static str;
}

impl Authored for Post {
    fn author_id(&self) -> i64 {
        self.author_id
    }

    fn kind() -> &'static str {
        "post"
    }
}

impl Authored for Comment {
    fn author_id(&self) -> i64 {
        self.author_id
    }

    fn kind() -> &'static str {
        "comment"
    }
}

/// Pure decision: ownership or moderator status grants modification.
pub fn can_modify<T: Authored>(actor_id: i64, actor_is_moderator: bool, item: &T) -> bool {
    item.author_id() == actor_id || actor_is_moderator
}

/// Resolve the actor's moderator flag and apply [`can_modify`].
///
/// The flag is only looked up when ownership does not already decide. An actor
/// id with no user row is never a moderator.
pub async fn check_can_modify<T: Authored>(
    conn: &mut SqliteConnection,
    actor_id: i64,
    item: &T,
) -> Result<bool> {
    if item.author_id() == actor_id {
        return Ok(true);
    }

    let is_moderator = user_repo::moderator_flag(conn, actor_id)
        .await?
        .unwrap_or(false);

    Ok(can_modify(actor_id, is_moderator, item))
}

/// Like [`check_can_modify`] but turns a denial into `AppError::Forbidden`.
pub async fn authorize_modification<T: Authored>(
    conn: &mut SqliteConnection,
    actor_id: i64,
    item: &T,
) -> Result<()> {
    if check_can_modify(conn, actor_id, item).await? {
        return Ok(());
    }

    AUTHORIZATION_DENIALS_TOTAL
        .with_label_values(&[T::kind()])
        .inc();
    tracing::warn!(
        actor_id,
        author_id = item.author_id(),
        entity = T::kind(),
        "modification denied"
    );

    Err(AppError::Forbidden(format!(
        "You don't have permission to modify this {}",
        T::kind()
    )))
}
