//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Geocoding API
        .route("/map/locations", get(handlers::search_by_location))
        .route("/map/coords", get(handlers::search_by_coords))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
