//! The `axum` transport: a thin adapter producing [`crate::decision::DecisionRequest`]s
//! from JSON bodies and rendering [`crate::decision::DecisionResponse`]s back to JSON.
//!
//! Not part of the core decision engine; see the crate-level module layout.

pub mod dto;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

pub use handlers::AppState;

/// Builds the full router: the authentication endpoint plus the six admin
/// ACL endpoints and the supplemented snapshot endpoint.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/auth", post(handlers::auth))
        .route(
            "/whitelist",
            post(handlers::add_whitelist).delete(handlers::delete_whitelist),
        )
        .route("/whitelist/check", get(handlers::check_whitelist))
        .route(
            "/blacklist",
            post(handlers::add_blacklist).delete(handlers::delete_blacklist),
        )
        .route("/blacklist/check", get(handlers::check_blacklist))
        .route("/acl", get(handlers::acl_snapshot))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
