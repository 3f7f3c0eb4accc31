use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod metadata;
pub mod selection;
pub mod similarity;

pub use catalog::Catalog;
pub use metadata::{MovieAssets, MovieMetadata};
pub use selection::{SelectionState, UiEvent};
pub use similarity::SimilarityMatrix;

/// TMDB movie identifier as stored in the catalog artifact
pub type MovieId = u64;

/// A recommendable movie and its row in the similarity matrix
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: MovieId,
    pub title: String,
    /// Zero-based row/column index into the similarity matrix
    pub position: usize,
}

/// A single ranked recommendation
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub id: MovieId,
    pub title: String,
    pub position: usize,
    pub score: f64,
}

impl Recommendation {
    pub fn from_item(item: &Item, score: f64) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            position: item.position,
            score,
        }
    }
}
