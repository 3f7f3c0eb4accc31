use serde::Serialize;

use crate::{
    error::AppError,
    models::{SelectionState, UiEvent},
    services::{recommender, Artifacts, MetadataLookup, DEFAULT_K},
};

/// Applies a user interaction to the current selection.
pub fn apply(state: SelectionState, event: UiEvent) -> SelectionState {
    match event {
        UiEvent::Submit(title) | UiEvent::PickRecommendation(title) => {
            SelectionState::with_selected(title)
        }
        UiEvent::Refresh => state,
    }
}

/// A poster card on the page
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieCard {
    pub id: u64,
    pub title: String,
    pub poster_url: String,
}

/// Everything the page template needs for one render
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct PageView {
    /// Options of the select control, in catalog order
    pub titles: Vec<String>,
    /// Option pre-selected in the control
    pub default_index: usize,
    pub selected: Option<MovieCard>,
    /// Page background; absent leaves the default background
    pub backdrop_url: Option<String>,
    pub recommendations: Vec<MovieCard>,
    /// Non-fatal message shown above the results
    pub message: Option<String>,
}

/// Computes the view for `state`: the selected movie, its backdrop and its
/// recommendations with posters. Unknown titles produce a message, not an error.
pub async fn build_page(
    artifacts: &Artifacts,
    metadata: &MetadataLookup,
    state: &SelectionState,
) -> PageView {
    let catalog = &artifacts.catalog;
    let titles: Vec<String> = catalog.titles().map(str::to_string).collect();
    let default_index = state
        .selected()
        .and_then(|selected| titles.iter().position(|t| t == selected))
        .unwrap_or(0);

    let mut view = PageView {
        titles,
        default_index,
        ..Default::default()
    };

    let Some(selected) = state.selected() else {
        return view;
    };

    let item = match catalog.find_by_title(selected) {
        Ok(item) => item,
        Err(AppError::NotFound(msg)) => {
            tracing::info!(title = %selected, "Selected title is not in the catalog");
            view.message = Some(msg);
            return view;
        }
        Err(e) => {
            view.message = Some(e.to_string());
            return view;
        }
    };

    let assets = metadata.assets(item.id).await;
    view.backdrop_url = assets.backdrop_url;
    view.selected = Some(MovieCard {
        id: item.id,
        title: item.title.clone(),
        poster_url: assets.poster_url,
    });

    match recommender::recommend(catalog, &artifacts.matrix, &item.title, DEFAULT_K) {
        Ok(recommendations) => {
            for rec in recommendations {
                let poster_url = metadata.poster_url(rec.id).await;
                view.recommendations.push(MovieCard {
                    id: rec.id,
                    title: rec.title,
                    poster_url,
                });
            }
        }
        Err(e) => {
            tracing::error!(error = %e, title = %item.title, "Recommendation failed");
            view.message = Some(e.to_string());
        }
    }

    view
}
