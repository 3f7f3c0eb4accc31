use serde::{Deserialize, Deserializer, Serialize};

use crate::models::MovieId;

/// Subset of the TMDB `/movie/{id}` record the UI needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieMetadata {
    pub id: MovieId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "non_empty_path")]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "non_empty_path")]
    pub backdrop_path: Option<String>,
}

/// TMDB sends `null` or `""` for missing images; both mean absent.
fn non_empty_path<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let path: Option<String> = Option::deserialize(deserializer)?;
    Ok(path.filter(|p| !p.trim().is_empty()))
}

/// Display assets resolved for one movie
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MovieAssets {
    pub id: MovieId,
    pub poster_url: String,
    /// Absent means "leave the page background alone"
    pub backdrop_url: Option<String>,
}
