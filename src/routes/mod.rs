//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the status endpoint, the paper catalog, and the form actions under
//! a single Axum router. Pages and navigation chrome are rendered by the
//! separate frontend; this API is everything it talks to.

pub mod auth;
pub mod feeds;
pub mod interests;
pub mod outcome;
pub mod papers;

pub use outcome::ActionOutcome;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/status", get(auth::status))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/papers", get(papers::list_papers).post(papers::register_paper))
        .route(
            "/api/interests",
            get(interests::list_interests).post(interests::add_interest),
        )
        .route(
            "/api/interests/{id}",
            post(interests::update_interest).delete(interests::remove_interest),
        )
        .route("/api/feeds", get(feeds::list_feeds).post(feeds::add_feed))
        .route("/api/feeds/{id}", delete(feeds::remove_feed))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
