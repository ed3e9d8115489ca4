/// Data models for forum-service
///
/// Entities mirror the four tables (users, topics, posts, comments). Post and
/// comment rows are read joined with their author's username. Request bodies
/// are explicit per-operation shapes; missing fields deserialize to zero/empty
/// and are rejected by `validate()` before any storage access.
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A forum user, created lazily on first login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub is_moderator: bool,
}

/// A discussion topic. Seeded at startup, read-only through the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: i64,
    pub title: String,
    pub description: String,
}

/// A post with its author's username resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub topic_id: i64,
    pub author_id: i64,
    pub title: String,
    pub content: String,
    /// Username of the author
    pub author: String,
}

/// A comment with its author's username resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub author: String,
}

// =====================================================================
// Request shapes
// =====================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePostRequest {
    #[validate(range(min = 1, message = "topicId is required"))]
    pub topic_id: i64,
    #[validate(range(min = 1, message = "userId is required"))]
    pub user_id: i64,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePostRequest {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i64,
    #[validate(range(min = 1, message = "userId is required"))]
    pub user_id: i64,
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// Body of `DELETE /posts` and `DELETE /comments`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteRequest {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i64,
    #[validate(range(min = 1, message = "userId is required"))]
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateCommentRequest {
    #[validate(range(min = 1, message = "postId is required"))]
    pub post_id: i64,
    #[validate(range(min = 1, message = "userId is required"))]
    pub user_id: i64,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCommentRequest {
    #[validate(range(min = 1, message = "id is required"))]
    pub id: i64,
    #[validate(range(min = 1, message = "userId is required"))]
    pub user_id: i64,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}

/// `GET /posts?topicId=N`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsQuery {
    pub topic_id: Option<String>,
}

impl ListPostsQuery {
    pub fn topic_id(&self) -> Result<i64> {
        parse_id_param(self.topic_id.as_deref(), "topicId")
    }
}

/// `GET /comments?postId=N`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    pub post_id: Option<String>,
}

impl ListCommentsQuery {
    pub fn post_id(&self) -> Result<i64> {
        parse_id_param(self.post_id.as_deref(), "postId")
    }
}

/// Query-string IDs arrive as text; missing and non-numeric are both invalid.
/// The value is parsed as-is, so surrounding whitespace is rejected.
fn parse_id_param(raw: Option<&str>, field: &str) -> Result<i64> {
    let raw = raw
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing {} parameter", field)))?;

    raw.parse::<i64>()
        .map_err(|_| AppError::Validation(format!("Invalid {} parameter", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_fail_validation() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"topicId": 1, "userId": 2, "title": "Hi"}"#).unwrap();
        assert_eq!(req.content, "");
        assert!(req.validate().is_err());

        let req: CreatePostRequest = serde_json::from_str(
            r#"{"topicId": 1, "userId": 2, "title": "Hi", "content": "Hello"}"#,
        )
        .unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_zero_ids_are_absent() {
        let req = DeleteRequest { id: 0, user_id: 1 };
        assert!(req.validate().is_err());

        let req = UpdateCommentRequest {
            id: 3,
            user_id: 0,
            content: "edited".into(),
        };
        let err = req.validate().unwrap_err();
        assert!(err.to_string().contains("userId is required"));
    }

    #[test]
    fn test_list_query_ids() {
        let query = ListPostsQuery {
            topic_id: Some("12".into()),
        };
        assert_eq!(query.topic_id().unwrap(), 12);

        let query = ListPostsQuery { topic_id: None };
        assert!(matches!(query.topic_id(), Err(AppError::Validation(_))));

        let query = ListCommentsQuery {
            post_id: Some("abc".into()),
        };
        let err = query.post_id().unwrap_err();
        assert!(err.to_string().contains("Invalid postId"));

        let query = ListPostsQuery {
            topic_id: Some(" 5".into()),
        };
        let err = query.topic_id().unwrap_err();
        assert!(err.to_string().contains("Invalid topicId"));
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post = Post {
            id: 5,
            topic_id: 1,
            author_id: 2,
            title: "Hi".into(),
            content: "Hello".into(),
            author: "bob".into(),
        };
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["topicId"], 1);
        assert_eq!(json["authorId"], 2);
        assert_eq!(json["author"], "bob");
    }

    #[test]
    fn test_user_serializes_moderator_flag() {
        let user = User {
            id: 1,
            username: "alice".into(),
            is_moderator: true,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["isModerator"], true);
    }
}
