use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id::make_span_with_request_id;

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
///
/// Every response carries `x-request-id`: the caller's value when one was
/// sent, a fresh UUID otherwise.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/matrix", get(handlers::get_matrix))
        .route(
            "/users/:user/recommendations",
            get(handlers::get_recommendations),
        )
        .route("/users/:user/report", get(handlers::get_report))
}
