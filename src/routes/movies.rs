use axum::{
    extract::{Path, State},
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::{MovieAssets, MovieId},
    routes::AppState,
};

/// Handler for a catalog movie's poster and backdrop
///
/// Metadata failures degrade to the placeholder poster; only unknown ids fail.
pub async fn assets(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<MovieAssets>> {
    let item = state.artifacts.catalog.find_by_id(id)?;
    tracing::debug!(request_id = %request_id, movie_id = item.id, "Resolving movie assets");

    Ok(Json(state.metadata.assets(item.id).await))
}
