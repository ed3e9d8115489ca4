mod common;

use common::{count, setup_pool, ALICE, BOB, GENERAL, HOMEWORK};
use forum_service::db::comment_repo;
use forum_service::models::{
    CreateCommentRequest, CreatePostRequest, DeleteRequest, UpdateCommentRequest,
    UpdatePostRequest,
};
use forum_service::services::{CommentService, PostService, TopicService, UserDirectory};
use forum_service::AppError;

fn new_post(topic_id: i64, user_id: i64, title: &str, content: &str) -> CreatePostRequest {
    CreatePostRequest {
        topic_id,
        user_id,
        title: title.to_string(),
        content: content.to_string(),
    }
}

fn new_comment(post_id: i64, user_id: i64, content: &str) -> CreateCommentRequest {
    CreateCommentRequest {
        post_id,
        user_id,
        content: content.to_string(),
    }
}

#[tokio::test]
async fn topics_are_seeded_in_order() {
    let pool = setup_pool(false).await;
    let topics = TopicService::new(pool).list_topics().await.unwrap();

    let titles: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["General", "Homework"]);
    assert_eq!(topics[1].description, "Ask about assignments");
}

#[tokio::test]
async fn demo_content_lists_by_topic() {
    let pool = setup_pool(true).await;
    let posts = PostService::new(pool.clone());

    let general = posts.list_posts(GENERAL).await.unwrap();
    assert_eq!(general.len(), 2);
    assert!(general.windows(2).all(|w| w[0].id < w[1].id));
    assert!(general.iter().all(|p| p.topic_id == GENERAL));
    assert_eq!(general[0].author, "alice");

    assert!(posts.list_posts(9999).await.unwrap().is_empty());

    let comments = CommentService::new(pool);
    let on_first = comments.list_comments(general[0].id).await.unwrap();
    assert_eq!(on_first.len(), 2);
    assert_eq!(on_first[1].author, "bob");
}

#[tokio::test]
async fn create_post_then_list() {
    let pool = setup_pool(false).await;
    let posts = PostService::new(pool);

    let created = posts
        .create_post(&new_post(HOMEWORK, BOB, "Q3", "How do I start?"))
        .await
        .unwrap();
    assert_eq!(created.author_id, BOB);
    assert_eq!(created.author, "bob");

    let listed = posts.list_posts(HOMEWORK).await.unwrap();
    assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn create_post_with_missing_field_changes_nothing() {
    let pool = setup_pool(false).await;
    let posts = PostService::new(pool.clone());

    let err = posts
        .create_post(&new_post(GENERAL, BOB, "Title", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = posts
        .create_post(&new_post(0, BOB, "Title", "Body"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(count(&pool, "posts").await, 0);
}

#[tokio::test]
async fn dangling_references_are_referential_errors() {
    let pool = setup_pool(false).await;
    let posts = PostService::new(pool.clone());
    let comments = CommentService::new(pool.clone());

    let err = posts
        .create_post(&new_post(9999, BOB, "Lost", "No such topic"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Referential(_)), "{:?}", err);

    let err = posts
        .create_post(&new_post(GENERAL, 9999, "Ghost", "No such user"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Referential(_)), "{:?}", err);

    let err = comments
        .create_comment(&new_comment(9999, BOB, "Into the void"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Referential(_)), "{:?}", err);

    assert_eq!(count(&pool, "posts").await, 0);
    assert_eq!(count(&pool, "comments").await, 0);
}

#[tokio::test]
async fn author_moderator_and_stranger_permissions() {
    let pool = setup_pool(false).await;
    let posts = PostService::new(pool.clone());
    let carol = UserDirectory::new(pool.clone())
        .resolve_or_create("carol")
        .await
        .unwrap();

    let post = posts
        .create_post(&new_post(GENERAL, BOB, "Bob's post", "original"))
        .await
        .unwrap();

    // Stranger cannot edit
    let err = posts
        .update_post(&UpdatePostRequest {
            id: post.id,
            user_id: carol.id,
            title: "hijacked".into(),
            content: "hijacked".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
    assert_eq!(posts.get_post(post.id).await.unwrap().unwrap().content, "original");

    // Moderator can edit someone else's post
    let edited = posts
        .update_post(&UpdatePostRequest {
            id: post.id,
            user_id: ALICE,
            title: "Bob's post".into(),
            content: "moderated".into(),
        })
        .await
        .unwrap();
    assert_eq!(edited.content, "moderated");
    assert_eq!(edited.author_id, BOB);

    // Stranger cannot delete, author can
    let err = posts
        .delete_post(&DeleteRequest {
            id: post.id,
            user_id: carol.id,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    posts
        .delete_post(&DeleteRequest {
            id: post.id,
            user_id: BOB,
        })
        .await
        .unwrap();
    assert!(posts.get_post(post.id).await.unwrap().is_none());
}

#[tokio::test]
async fn missing_targets_are_not_found() {
    let pool = setup_pool(false).await;
    let posts = PostService::new(pool.clone());
    let comments = CommentService::new(pool);

    let err = posts
        .delete_post(&DeleteRequest {
            id: 9999,
            user_id: ALICE,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = posts
        .update_post(&UpdatePostRequest {
            id: 9999,
            user_id: ALICE,
            title: "t".into(),
            content: "c".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = comments
        .update_comment(&UpdateCommentRequest {
            id: 9999,
            user_id: ALICE,
            content: "c".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = comments
        .delete_comment(&DeleteRequest {
            id: 9999,
            user_id: ALICE,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn deleting_post_removes_its_comments() {
    let pool = setup_pool(false).await;
    let posts = PostService::new(pool.clone());
    let comments = CommentService::new(pool.clone());

    let keep = posts
        .create_post(&new_post(GENERAL, ALICE, "Keep", "stays"))
        .await
        .unwrap();
    let doomed = posts
        .create_post(&new_post(GENERAL, BOB, "Doomed", "goes"))
        .await
        .unwrap();

    for n in 0..3 {
        comments
            .create_comment(&new_comment(doomed.id, ALICE, &format!("reply {}", n)))
            .await
            .unwrap();
    }
    comments
        .create_comment(&new_comment(keep.id, BOB, "survivor"))
        .await
        .unwrap();

    posts
        .delete_post(&DeleteRequest {
            id: doomed.id,
            user_id: BOB,
        })
        .await
        .unwrap();

    assert!(comments.list_comments(doomed.id).await.unwrap().is_empty());
    let mut conn = pool.acquire().await.unwrap();
    let orphans = comment_repo::count_comments_by_post(&mut conn, doomed.id)
        .await
        .unwrap();
    assert_eq!(orphans, 0);
    drop(conn);
    assert_eq!(comments.list_comments(keep.id).await.unwrap().len(), 1);
}

#[tokio::test]
async fn comment_lifecycle() {
    let pool = setup_pool(false).await;
    let posts = PostService::new(pool.clone());
    let comments = CommentService::new(pool.clone());

    let post = posts
        .create_post(&new_post(HOMEWORK, ALICE, "Deadline", "Friday"))
        .await
        .unwrap();

    let comment = comments
        .create_comment(&new_comment(post.id, BOB, "Thanks!"))
        .await
        .unwrap();
    assert_eq!(comment.author, "bob");
    assert_eq!(
        comments.list_comments(post.id).await.unwrap(),
        vec![comment.clone()]
    );

    let edited = comments
        .update_comment(&UpdateCommentRequest {
            id: comment.id,
            user_id: BOB,
            content: "Thanks a lot!".into(),
        })
        .await
        .unwrap();
    assert_eq!(edited.content, "Thanks a lot!");
    assert_eq!(edited.post_id, post.id);

    let err = comments
        .update_comment(&UpdateCommentRequest {
            id: comment.id,
            user_id: BOB,
            content: String::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    // Moderator removes bob's comment
    comments
        .delete_comment(&DeleteRequest {
            id: comment.id,
            user_id: ALICE,
        })
        .await
        .unwrap();
    assert!(comments.get_comment(comment.id).await.unwrap().is_none());
    assert_eq!(count(&pool, "comments").await, 0);
}

#[tokio::test]
async fn non_moderator_cannot_touch_others_comments() {
    let pool = setup_pool(false).await;
    let posts = PostService::new(pool.clone());
    let comments = CommentService::new(pool.clone());

    let post = posts
        .create_post(&new_post(GENERAL, BOB, "Hi", "there"))
        .await
        .unwrap();
    let comment = comments
        .create_comment(&new_comment(post.id, ALICE, "Welcome"))
        .await
        .unwrap();

    let err = comments
        .delete_comment(&DeleteRequest {
            id: comment.id,
            user_id: BOB,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    // Unknown actor id is treated as a non-moderator
    let err = comments
        .update_comment(&UpdateCommentRequest {
            id: comment.id,
            user_id: 9999,
            content: "spoofed".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    assert_eq!(count(&pool, "comments").await, 1);
}
