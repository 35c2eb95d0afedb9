//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;
mod users;
mod views;


use actix_web::web;

use crate::middleware::error::AppError;

/// Request bodies carry rich-text HTML.
const JSON_LIMIT: usize = 5 * 1024 * 1024;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login)),
            )
            .service(
                web::resource("/users/me")
                    .route(web::get().to(users::me))
                    .route(web::put().to(users::update_me)),
            )
            .service(
                web::scope("/posts")
                    .service(
                        web::resource("")
                            .route(web::get().to(posts::list))
                            .route(web::post().to(posts::create)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(posts::get))
                            .route(web::put().to(posts::update))
                            .route(web::delete().to(posts::delete)),
                    )
                    .route("/{id}/like", web::post().to(posts::toggle_like))
                    .service(
                        web::resource("/{id}/comments")
                            .route(web::get().to(comments::list))
                            .route(web::post().to(comments::create)),
                    )
                    .service(
                        web::resource("/{id}/comments/{comment_id}")
                            .route(web::put().to(comments::update))
                            .route(web::delete().to(comments::delete)),
                    ),
            ),
    );
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// A path id that is not a UUID cannot name anything.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Resource not found".to_string()).into())
}
