/// Business logic layer for forum-service
///
/// - User directory: username login, moderator lookup
/// - Topic service: read-only topic listing
/// - Post service: post lifecycle, cascading deletion of comments
/// - Comment service: comment lifecycle
///
/// Every service holds the shared pool handed to it by the caller; nothing here
/// keeps global state.
pub mod comments;
pub mod posts;
pub mod topics;
pub mod users;

pub use comments::CommentService;
pub use posts::PostService;
pub use topics::TopicService;
pub use users::UserDirectory;
