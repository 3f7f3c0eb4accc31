use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{models::Item, routes::AppState};

/// Handler listing every catalog movie in catalog order
pub async fn list(State(state): State<Arc<AppState>>) -> Json<Vec<Item>> {
    Json(state.artifacts.catalog.items().to_vec())
}
