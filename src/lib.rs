//! Minimal blogging backend built with Rust.
//!
//! Users sign up or sign in to receive a signed bearer token; post routes
//! sit behind an auth gate that verifies the token and binds the caller's
//! identity before any handler runs.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;

pub use config::Config;
pub use error::{AppError, AuthError};
pub use handlers::http::AppState;

use axum::routing::{get, post};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router (health, user, blog). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let user_routes = axum::Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin));

    let blog_routes = axum::Router::new()
        .route("/", post(handlers::create_post).put(handlers::update_post))
        .route("/bulk", get(handlers::list_posts))
        .route("/:id", get(handlers::get_post))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    axum::Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1/user", user_routes)
        .nest("/api/v1/blog", blog_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
