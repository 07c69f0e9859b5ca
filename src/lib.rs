//! ChaletBook booking backend.
//!
//! Axum + sqlx backend exposing availability, customer reservation and
//! owner block APIs for chalet rental units.

pub mod booking;
pub mod cache;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;

use axum::{extract::State, routing::get, Json, Router};
use sqlx::PgPool;

use cache::{AppCache, CacheStats};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .nest("/api", booking::router().merge(routes::units::router()))
        .with_state(state)
}

/// Liveness probe
async fn health() -> &'static str {
    "ok"
}

/// Cache statistics for monitoring
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
