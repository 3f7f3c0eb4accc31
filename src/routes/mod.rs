use axum::{
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{Artifacts, MetadataLookup},
};

pub mod movies;
pub mod page;
pub mod recommendations;
pub mod titles;

/// Shared, read-only application state
pub struct AppState {
    pub artifacts: Artifacts,
    pub metadata: MetadataLookup,
}

impl AppState {
    pub fn new(artifacts: Artifacts, metadata: MetadataLookup) -> Self {
        Self {
            artifacts,
            metadata,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/titles", get(titles::list))
        .route("/recommendations", get(recommendations::by_title))
        .route("/movies/:id/recommendations", get(recommendations::by_id))
        .route("/movies/:id/assets", get(movies::assets))
        .layer(CorsLayer::permissive())
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
