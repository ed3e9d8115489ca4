/// HTTP handlers for forum endpoints
///
/// Paths and JSON shapes follow the forum frontend:
/// - `POST /login`: resolve or create a user by username
/// - `GET /topics`
/// - `/posts` and `/comments`: GET lists (query param), POST creates,
///   PUT updates, DELETE deletes (JSON body carries `id` and `userId`)
/// - `/health`, `/health/ready`, `/health/live`, `/metrics`
pub mod auth;
pub mod comments;
pub mod health;
pub mod posts;
pub mod topics;

pub use auth::login;
pub use comments::{create_comment, delete_comment, list_comments, update_comment};
pub use health::{health, liveness, readiness};
pub use posts::{create_post, delete_post, list_posts, update_post};
pub use topics::list_topics;

use crate::error::AppError;
use actix_web::web;

/// JSON extractor settings: malformed bodies become validation errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            AppError::Validation(format!("Invalid JSON body: {}", err)).into()
        })
}

/// Query-string extractor settings, same treatment as JSON bodies.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Invalid query string: {}", err)).into()
    })
}

/// Register every forum route. Shared by the server and the HTTP tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .route("/health", web::get().to(health))
        .route("/health/ready", web::get().to(readiness))
        .route("/health/live", web::get().to(liveness))
        .route("/metrics", web::get().to(crate::metrics::serve_metrics))
        .route("/login", web::post().to(login))
        .route("/topics", web::get().to(list_topics))
        .service(
            web::resource("/posts")
                .route(web::get().to(list_posts))
                .route(web::post().to(create_post))
                .route(web::put().to(update_post))
                .route(web::delete().to(delete_post)),
        )
        .service(
            web::resource("/comments")
                .route(web::get().to(list_comments))
                .route(web::post().to(create_comment))
                .route(web::put().to(update_comment))
                .route(web::delete().to(delete_comment)),
        );
}
