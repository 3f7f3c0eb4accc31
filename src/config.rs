use serde::Deserialize;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key, the only credential the service needs
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language requested for metadata records
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Base URL prepended to a record's poster path
    #[serde(default = "default_poster_base_url")]
    pub poster_base_url: String,

    /// Base URL prepended to a record's backdrop path
    #[serde(default = "default_backdrop_base_url")]
    pub backdrop_base_url: String,

    /// Image served when a movie has no poster or its metadata cannot be fetched
    #[serde(default = "default_placeholder_poster_url")]
    pub placeholder_poster_url: String,

    /// Precomputed catalog artifact (JSON array of `{id, title}`)
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Precomputed similarity matrix artifact (JSON array of rows)
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Timeout for a single metadata fetch, in seconds
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    /// Maximum cached metadata records. Unset means records are never evicted.
    #[serde(default)]
    pub metadata_cache_capacity: Option<usize>,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_poster_base_url() -> String {
    "https://image.tmdb.org/t/p/w500/".to_string()
}

fn default_backdrop_base_url() -> String {
    "https://image.tmdb.org/t/p/original/".to_string()
}

fn default_placeholder_poster_url() -> String {
    "https://via.placeholder.com/500x750?text=No+Poster".to_string()
}

fn default_catalog_path() -> String {
    "data/catalog.json".to_string()
}

fn default_similarity_path() -> String {
    "data/similarity.json".to_string()
}

fn default_metadata_timeout_secs() -> u64 {
    5
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn metadata_timeout(&self) -> Duration {
        Duration::from_secs(self.metadata_timeout_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
