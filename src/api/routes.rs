use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        // Outermost, so the trace span can see the request ID
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Same routes with permissive CORS for browser clients
pub fn create_router_with_cors(state: AppState) -> Router {
    create_router(state).layer(CorsLayer::permissive())
}

/// API routes under /api/v1, all scoped to the calling user
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/me/recommendations", get(handlers::get_recommendations))
        .route("/me/insights", get(handlers::get_insights))
        .route("/me/history", post(handlers::record_play))
}
