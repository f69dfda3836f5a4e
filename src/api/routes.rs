use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Search input and results
        .route(
            "/search",
            get(handlers::get_search).post(handlers::submit_search),
        )
        .route("/search/page", post(handlers::change_page))
        .route("/search/retry", post(handlers::retry_search))
        // Detail view
        .route("/movies/:id/select", post(handlers::select_movie))
        .route(
            "/selection",
            get(handlers::get_selection).delete(handlers::close_selection),
        )
        // Notifications
        .route("/notifications", get(handlers::get_notifications))
}
