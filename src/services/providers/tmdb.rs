/// The Movie Database (TMDB) provider
///
/// API Flow:
/// 1. Details: /movie/{id}?api_key=..&language=.. → poster_path, backdrop_path, ...
///
/// Image URLs are built by the Metadata Lookup from the configured base URLs.
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{MovieId, MovieMetadata},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    /// Creates a provider whose requests give up after `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        language: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            language,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_language.clone(),
            config.metadata_timeout(),
        )
    }

    fn movie_url(&self, id: MovieId) -> String {
        format!("{}/movie/{}", self.api_url.trim_end_matches('/'), id)
    }
}

/// reqwest errors quote the request URL, which carries the API key
fn redact_url(error: reqwest::Error) -> AppError {
    AppError::HttpClient(error.without_url())
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_movie(&self, id: MovieId) -> AppResult<MovieMetadata> {
        let response = self
            .http_client
            .get(self.movie_url(id))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await
            .map_err(redact_url)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::MetadataFetch(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await.map_err(redact_url)?;
        tracing::debug!(movie_id = id, response = %response_text, "Raw TMDB API response");

        let record: MovieMetadata = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                movie_id = id,
                "Failed to deserialize TMDB response"
            );
            AppError::MetadataFetch(format!("Failed to parse TMDB response: {}", e))
        })?;

        tracing::info!(
            movie_id = id,
            has_poster = record.poster_path.is_some(),
            has_backdrop = record.backdrop_path.is_some(),
            provider = "tmdb",
            "Movie metadata fetched"
        );

        Ok(record)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
