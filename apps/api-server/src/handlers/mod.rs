//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod comments;
mod health;
mod pagination;
mod share;
mod tags;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        // Accounts
        .route("/register/", web::post().to(auth::register))
        .route("/login/", web::post().to(auth::login))
        // Blogs
        .service(
            web::resource("/blogs/")
                .route(web::get().to(blogs::list_blogs))
                .route(web::post().to(blogs::create_blog)),
        )
        .route("/blogs/share/{blog_id}/", web::post().to(share::share_blog))
        .service(
            web::resource("/blogs/{id}/")
                .route(web::get().to(blogs::get_blog))
                .route(web::put().to(blogs::update_blog))
                .route(web::delete().to(blogs::delete_blog)),
        )
        // Comments
        .route("/comments/", web::post().to(comments::create_comment))
        .service(
            web::resource("/comments/{id}/")
                .route(web::get().to(comments::get_comment))
                .route(web::put().to(comments::update_comment))
                .route(web::delete().to(comments::delete_comment))
                .route(web::post().to(comments::like_comment)),
        )
        // Tags
        .service(
            web::resource("/tags/")
                .route(web::get().to(tags::list_tags))
                .route(web::post().to(tags::create_tag)),
        );
}

/// JSON extractor settings: malformed bodies become RFC 7807 400s.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!(error = %err, "Rejected request body");
        AppError::BadRequest(err.to_string()).into()
    })
}
