/// Movie metadata provider abstraction
///
/// The Metadata Lookup talks to the outside world only through this trait, so the
/// upstream service can be swapped or mocked in tests.
use crate::{
    error::AppResult,
    models::{MovieId, MovieMetadata},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch the full metadata record for a movie
    ///
    /// Network failures, non-success responses and malformed payloads are all errors;
    /// callers decide how to degrade.
    async fn fetch_movie(&self, id: MovieId) -> AppResult<MovieMetadata>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
