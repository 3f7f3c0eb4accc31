use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{Item, MovieAssets, MovieId, Recommendation},
    routes::AppState,
    services::{recommender, DEFAULT_K},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    title: String,
}

#[derive(Debug, Serialize)]
pub struct QueryMovie {
    pub id: MovieId,
    pub title: String,
    pub poster_url: String,
    pub backdrop_url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub id: MovieId,
    pub title: String,
    pub score: f64,
    pub poster_url: String,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub query: QueryMovie,
    pub recommendations: Vec<RecommendedMovie>,
}

/// Handler for recommendations keyed by exact title
pub async fn by_title(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    if params.title.trim().is_empty() {
        return Err(AppError::InvalidInput("Title cannot be empty".to_string()));
    }

    tracing::info!(request_id = %request_id, title = %params.title, "Processing recommendation request");

    let artifacts = &state.artifacts;
    let item = artifacts.catalog.find_by_title(&params.title)?;
    let recommendations =
        recommender::recommend_for_item(&artifacts.catalog, &artifacts.matrix, item, DEFAULT_K)?;

    Ok(Json(respond(&state, &request_id, item, recommendations).await))
}

/// Handler for recommendations keyed by movie id
pub async fn by_id(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<RecommendationResponse>> {
    tracing::info!(request_id = %request_id, movie_id = id, "Processing recommendation request");

    let artifacts = &state.artifacts;
    let item = artifacts.catalog.find_by_id(id)?;
    let recommendations =
        recommender::recommend_by_id(&artifacts.catalog, &artifacts.matrix, id, DEFAULT_K)?;

    Ok(Json(respond(&state, &request_id, item, recommendations).await))
}

async fn respond(
    state: &AppState,
    request_id: &RequestId,
    item: &Item,
    recommendations: Vec<Recommendation>,
) -> RecommendationResponse {
    let MovieAssets {
        poster_url,
        backdrop_url,
        ..
    } = state.metadata.assets(item.id).await;

    let mut recommended = Vec::with_capacity(recommendations.len());
    for rec in recommendations {
        let poster_url = state.metadata.poster_url(rec.id).await;
        recommended.push(RecommendedMovie {
            id: rec.id,
            title: rec.title,
            score: rec.score,
            poster_url,
        });
    }

    tracing::info!(
        request_id = %request_id,
        movie_id = item.id,
        count = recommended.len(),
        "Recommendations completed"
    );

    RecommendationResponse {
        query: QueryMovie {
            id: item.id,
            title: item.title.clone(),
            poster_url,
            backdrop_url,
        },
        recommendations: recommended,
    }
}
