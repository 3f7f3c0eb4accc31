use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, Item, MovieId, Recommendation, SimilarityMatrix},
};

/// Number of recommendations shown for a selected movie
pub const DEFAULT_K: usize = 5;

/// Returns the `k` movies most similar to `query_title`, best first.
///
/// The query movie itself is never part of the result, whatever its self-similarity.
/// Equal scores are ordered by ascending catalog position. Catalogs with fewer than
/// `k + 1` movies yield fewer than `k` results.
pub fn recommend(
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    query_title: &str,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    let item = catalog.find_by_title(query_title)?;
    recommend_for_item(catalog, matrix, item, k)
}

/// Same as [`recommend`], keyed by movie id.
pub fn recommend_by_id(
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    id: MovieId,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    let item = catalog.find_by_id(id)?;
    recommend_for_item(catalog, matrix, item, k)
}

/// Ranks for a catalog item the caller has already resolved.
pub fn recommend_for_item(
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
    query: &Item,
    k: usize,
) -> AppResult<Vec<Recommendation>> {
    let row = matrix.row(query.position).ok_or_else(|| {
        AppError::Internal(format!(
            "No similarity row for position {} ({} rows loaded)",
            query.position,
            matrix.dim()
        ))
    })?;

    // Scores are finite (checked at load); -0.0 and 0.0 compare equal and tie by position.
    let mut scored: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(a.0.cmp(&b.0))
    });

    scored
        .into_iter()
        .filter(|&(position, _)| position != query.position)
        .take(k)
        .map(|(position, score)| {
            catalog
                .get(position)
                .map(|item| Recommendation::from_item(item, score))
                .ok_or_else(|| {
                    AppError::Internal(format!("No catalog item at position {}", position))
                })
        })
        .collect()
}
