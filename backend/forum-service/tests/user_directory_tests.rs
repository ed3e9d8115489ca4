mod common;

use common::{count, setup_file_pool, setup_pool, ALICE, BOB};
use forum_service::services::UserDirectory;
use forum_service::AppError;

#[tokio::test]
async fn login_is_idempotent() {
    let pool = setup_pool(false).await;
    let directory = UserDirectory::new(pool.clone());

    let first = directory.resolve_or_create("carol").await.unwrap();
    let second = directory.resolve_or_create("carol").await.unwrap();

    assert_eq!(first, second);
    assert!(!first.is_moderator);
    assert_eq!(count(&pool, "users").await, 3);
}

#[tokio::test]
async fn login_trims_username() {
    let pool = setup_pool(false).await;
    let directory = UserDirectory::new(pool);

    let user = directory.resolve_or_create("  bob  ").await.unwrap();
    assert_eq!(user.id, BOB);
    assert_eq!(user.username, "bob");
}

#[tokio::test]
async fn usernames_are_case_sensitive() {
    let pool = setup_pool(false).await;
    let directory = UserDirectory::new(pool);

    let user = directory.resolve_or_create("Alice").await.unwrap();
    assert_ne!(user.id, ALICE);
    assert!(!user.is_moderator);
}

#[tokio::test]
async fn empty_username_is_rejected() {
    let pool = setup_pool(false).await;
    let directory = UserDirectory::new(pool.clone());

    for name in ["", "   ", "\t\n"] {
        let err = directory.resolve_or_create(name).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{:?}", err);
    }
    assert_eq!(count(&pool, "users").await, 2);
}

#[tokio::test]
async fn seeded_moderator_flags() {
    let pool = setup_pool(false).await;
    let directory = UserDirectory::new(pool);

    assert!(directory.is_moderator(ALICE).await.unwrap());
    assert!(!directory.is_moderator(BOB).await.unwrap());

    let err = directory.is_moderator(9999).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let alice = directory.find_user(ALICE).await.unwrap();
    assert_eq!(alice.username, "alice");
}

#[tokio::test]
async fn concurrent_first_logins_create_one_user() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_file_pool(&dir.path().join("forum.db"), 8).await;

    let logins = (0..8).map(|_| {
        let directory = UserDirectory::new(pool.clone());
        async move { directory.resolve_or_create("dave").await }
    });
    let results = futures::future::join_all(logins).await;

    let ids: Vec<i64> = results.into_iter().map(|r| r.unwrap().id).collect();
    assert!(ids.iter().all(|id| *id == ids[0]));

    let daves: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = 'dave'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(daves, 1);

    pool.close().await;
}
