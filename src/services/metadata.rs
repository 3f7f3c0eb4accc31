use std::sync::Arc;

use crate::{
    cache::{Cache, Capacity, EvictionPolicy, NeverEvict},
    cached,
    config::Config,
    error::AppResult,
    models::{MovieAssets, MovieId, MovieMetadata},
    services::providers::MetadataProvider,
};

/// Image URL settings for building display assets
#[derive(Debug, Clone)]
pub struct ImageUrls {
    pub poster_base_url: String,
    pub backdrop_base_url: String,
    pub placeholder_poster_url: String,
}

impl ImageUrls {
    pub fn from_config(config: &Config) -> Self {
        Self {
            poster_base_url: config.poster_base_url.clone(),
            backdrop_base_url: config.backdrop_base_url.clone(),
            placeholder_poster_url: config.placeholder_poster_url.clone(),
        }
    }

    fn join(base: &str, path: &str) -> String {
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn poster(&self, record: &MovieMetadata) -> String {
        record
            .poster_path
            .as_deref()
            .map(|path| Self::join(&self.poster_base_url, path))
            .unwrap_or_else(|| self.placeholder_poster_url.clone())
    }

    pub fn backdrop(&self, record: &MovieMetadata) -> Option<String> {
        record
            .backdrop_path
            .as_deref()
            .map(|path| Self::join(&self.backdrop_base_url, path))
    }
}

impl Default for ImageUrls {
    fn default() -> Self {
        Self {
            poster_base_url: "https://image.tmdb.org/t/p/w500/".to_string(),
            backdrop_base_url: "https://image.tmdb.org/t/p/original/".to_string(),
            placeholder_poster_url: "https://via.placeholder.com/500x750?text=No+Poster"
                .to_string(),
        }
    }
}

/// Resolves movie ids to poster and backdrop URLs.
///
/// Each id is fetched from the provider at most once while its record stays cached.
/// Fetch failures are logged and degraded to the placeholder poster with no backdrop;
/// they are not cached.
#[derive(Clone)]
pub struct MetadataLookup {
    provider: Arc<dyn MetadataProvider>,
    cache: Cache<MovieId, MovieMetadata>,
    urls: ImageUrls,
}

impl MetadataLookup {
    pub fn new(
        provider: Arc<dyn MetadataProvider>,
        urls: ImageUrls,
        policy: impl EvictionPolicy + 'static,
    ) -> Self {
        Self {
            provider,
            cache: Cache::new(policy),
            urls,
        }
    }

    pub fn from_config(provider: Arc<dyn MetadataProvider>, config: &Config) -> Self {
        let urls = ImageUrls::from_config(config);
        match config.metadata_cache_capacity {
            Some(capacity) => Self::new(provider, urls, Capacity(capacity)),
            None => Self::new(provider, urls, NeverEvict),
        }
    }

    /// Full metadata record, served from cache when present
    pub async fn record(&self, id: MovieId) -> AppResult<MovieMetadata> {
        let provider = self.provider.clone();
        cached!(self.cache, id, async move { provider.fetch_movie(id).await })
    }

    async fn record_or_log(&self, id: MovieId) -> Option<MovieMetadata> {
        match self.record(id).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    movie_id = id,
                    provider = self.provider.name(),
                    "Metadata fetch failed, using placeholder assets"
                );
                None
            }
        }
    }

    pub async fn poster_url(&self, id: MovieId) -> String {
        match self.record_or_log(id).await {
            Some(record) => self.urls.poster(&record),
            None => self.urls.placeholder_poster_url.clone(),
        }
    }

    pub async fn backdrop_url(&self, id: MovieId) -> Option<String> {
        self.record_or_log(id)
            .await
            .and_then(|record| self.urls.backdrop(&record))
    }

    /// Poster and backdrop together, from a single record lookup
    pub async fn assets(&self, id: MovieId) -> MovieAssets {
        let record = self.record_or_log(id).await;
        MovieAssets {
            id,
            poster_url: record
                .as_ref()
                .map(|r| self.urls.poster(r))
                .unwrap_or_else(|| self.urls.placeholder_poster_url.clone()),
            backdrop_url: record.as_ref().and_then(|r| self.urls.backdrop(r)),
        }
    }

    pub fn placeholder_poster_url(&self) -> &str {
        &self.urls.placeholder_poster_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MaxAge;
    use crate::error::AppError;
    use crate::services::providers::MockMetadataProvider;

    fn avatar() -> MovieMetadata {
        MovieMetadata {
            id: 19995,
            title: Some("Avatar".to_string()),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: Some("/backdrop.jpg".to_string()),
            ..Default::default()
        }
    }

    fn lookup(provider: MockMetadataProvider) -> MetadataLookup {
        MetadataLookup::new(Arc::new(provider), ImageUrls::default(), NeverEvict)
    }

    #[tokio::test]
    async fn test_repeated_lookups_fetch_once() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_movie()
            .withf(|id| *id == 19995)
            .times(1)
            .returning(|_| Ok(avatar()));

        let lookup = lookup(provider);

        assert_eq!(
            lookup.poster_url(19995).await,
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            lookup.poster_url(19995).await,
            "https://image.tmdb.org/t/p/w500/poster.jpg"
        );
        assert_eq!(
            lookup.backdrop_url(19995).await,
            Some("https://image.tmdb.org/t/p/original/backdrop.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_poster_uses_placeholder() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_fetch_movie().times(1).returning(|id| {
            Ok(MovieMetadata {
                id,
                ..Default::default()
            })
        });

        let lookup = lookup(provider);
        let assets = lookup.assets(42).await;

        assert_eq!(
            assets.poster_url,
            "https://via.placeholder.com/500x750?text=No+Poster"
        );
        assert_eq!(assets.backdrop_url, None);
    }

    #[tokio::test]
    async fn test_fetch_failure_degrades_and_is_not_cached() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_movie()
            .times(2)
            .returning(|_| Err(AppError::MetadataFetch("TMDB returned 503".to_string())));
        provider.expect_name().return_const("mock");

        let lookup = lookup(provider);

        assert_eq!(lookup.poster_url(1).await, lookup.placeholder_poster_url());
        assert_eq!(lookup.backdrop_url(1).await, None);
    }

    #[tokio::test]
    async fn test_expiring_policy_refetches() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_movie()
            .times(2)
            .returning(|_| Ok(avatar()));

        let lookup = MetadataLookup::new(
            Arc::new(provider),
            ImageUrls::default(),
            MaxAge(chrono::Duration::zero()),
        );

        lookup.record(19995).await.unwrap();
        lookup.record(19995).await.unwrap();
    }

    #[test]
    fn test_url_join_handles_slashes() {
        assert_eq!(
            ImageUrls::join("https://image.tmdb.org/t/p/w500/", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            ImageUrls::join("https://image.tmdb.org/t/p/w500", "abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }
}
