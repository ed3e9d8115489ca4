//! First-start fixture data.
//!
//! Each table is filled only when it is empty, so restarting the service
//! never duplicates rows. Everything runs in one transaction.

use super::{comment_repo, post_repo, topic_repo, user_repo};
use db_pool::begin_immediate;
use sqlx::SqlitePool;

/// (username, is_moderator)
const SEED_USERS: &[(&str, bool)] = &[("alice", true), ("bob", false)];

/// (title, description)
const SEED_TOPICS: &[(&str, &str)] = &[
    ("General", "General discussion"),
    ("Homework", "Ask about assignments"),
];

/// (topic index, author index, title, content)
const DEMO_POSTS: &[(usize, usize, &str, &str)] = &[
    (0, 0, "Welcome to the forum", "Introduce yourself and say hi!"),
    (0, 1, "General chat", "Talk about anything not related to homework."),
    (1, 0, "Math homework question", "I am stuck on question 3 of the worksheet."),
    (1, 1, "Project deadline reminder", "Don't forget the assignment is due next week."),
];

/// (post index, author index, content)
const DEMO_COMMENTS: &[(usize, usize, &str)] = &[
    (0, 0, "Hello everyone!"),
    (0, 1, "Nice to meet you all."),
    (1, 1, "I love random chats."),
    (2, 0, "Same, I'm also stuck on that question."),
    (3, 1, "Thanks for the reminder!"),
];

/// What `seed_if_empty` inserted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub topics: usize,
    pub posts: usize,
    pub comments: usize,
}

/// Insert seed users and topics, plus demo posts/comments when
/// `include_demo_content` is set, into whichever tables are still empty.
pub async fn seed_if_empty(
    pool: &SqlitePool,
    include_demo_content: bool,
) -> Result<SeedReport, sqlx::Error> {
    let mut tx = begin_immediate(pool).await?;
    let mut report = SeedReport::default();

    let mut user_ids = Vec::with_capacity(SEED_USERS.len());
    if user_repo::count_users(&mut tx).await? == 0 {
        for (username, is_moderator) in SEED_USERS {
            let user = user_repo::insert_user(&mut tx, username, *is_moderator).await?;
            user_ids.push(user.id);
        }
        report.users = user_ids.len();
    } else {
        for (username, _) in SEED_USERS {
            if let Some(user) = user_repo::find_by_username(&mut tx, username).await? {
                user_ids.push(user.id);
            }
        }
    }

    let mut topic_ids = Vec::with_capacity(SEED_TOPICS.len());
    if topic_repo::count_topics(&mut tx).await? == 0 {
        for (title, description) in SEED_TOPICS {
            let topic = topic_repo::insert_topic(&mut tx, title, description).await?;
            topic_ids.push(topic.id);
        }
        report.topics = topic_ids.len();
    }

    // Demo content needs the fixture users and topics we just created.
    let fixtures_complete =
        user_ids.len() == SEED_USERS.len() && topic_ids.len() == SEED_TOPICS.len();

    if include_demo_content && fixtures_complete && post_repo::count_posts(&mut tx).await? == 0 {
        let mut post_ids = Vec::with_capacity(DEMO_POSTS.len());
        for (topic, author, title, content) in DEMO_POSTS {
            let id = post_repo::insert_post(
                &mut tx,
                topic_ids[*topic],
                user_ids[*author],
                title,
                content,
            )
            .await?;
            post_ids.push(id);
        }
        report.posts = post_ids.len();

        if comment_repo::count_comments(&mut tx).await? == 0 {
            for (post, author, content) in DEMO_COMMENTS {
                comment_repo::insert_comment(&mut tx, post_ids[*post], user_ids[*author], content)
                    .await?;
            }
            report.comments = DEMO_COMMENTS.len();
        }
    }

    tx.commit().await?;

    tracing::info!(
        users = report.users,
        topics = report.topics,
        posts = report.posts,
        comments = report.comments,
        "Seed data applied"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::run_migrations;
    use db_pool::{create_pool, DbConfig};

    async fn fresh_pool() -> SqlitePool {
        let pool = create_pool(DbConfig::in_memory("seed-test")).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let pool = fresh_pool().await;

        let first = seed_if_empty(&pool, true).await.unwrap();
        assert_eq!(
            first,
            SeedReport {
                users: 2,
                topics: 2,
                posts: 4,
                comments: 5
            }
        );

        let second = seed_if_empty(&pool, true).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let mut conn = pool.acquire().await.unwrap();
        assert_eq!(user_repo::count_users(&mut conn).await.unwrap(), 2);
        assert_eq!(post_repo::count_posts(&mut conn).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_seed_without_demo_content() {
        let pool = fresh_pool().await;
        let report = seed_if_empty(&pool, false).await.unwrap();
        assert_eq!(report.topics, 2);
        assert_eq!(report.posts, 0);

        let mut conn = pool.acquire().await.unwrap();
        let alice = user_repo::find_by_username(&mut conn, "alice")
            .await
            .unwrap()
            .unwrap();
        assert!(alice.is_moderator);
        let bob = user_repo::find_by_username(&mut conn, "bob")
            .await
            .unwrap()
            .unwrap();
        assert!(!bob.is_moderator);
    }
}
