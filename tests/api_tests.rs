use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cinematch_api::{
    cache::NeverEvict,
    error::{AppError, AppResult},
    models::{Catalog, MovieId, MovieMetadata, SimilarityMatrix},
    routes::{create_router, AppState},
    services::{metadata::ImageUrls, providers::MetadataProvider, Artifacts, MetadataLookup},
};

/// Provider serving canned records and counting upstream fetches.
/// Id 6 fails like an unreachable upstream; id 5 has no images.
#[derive(Default)]
struct FakeProvider {
    fetches: AtomicUsize,
}

#[async_trait::async_trait]
impl MetadataProvider for FakeProvider {
    async fn fetch_movie(&self, id: MovieId) -> AppResult<MovieMetadata> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match id {
            6 => Err(AppError::MetadataFetch("TMDB API returned status 503".to_string())),
            5 => Ok(MovieMetadata {
                id,
                ..Default::default()
            }),
            _ => Ok(MovieMetadata {
                id,
                poster_path: Some(format!("/poster{}.jpg", id)),
                backdrop_path: Some(format!("/backdrop{}.jpg", id)),
                ..Default::default()
            }),
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

fn create_test_server() -> (TestServer, Arc<FakeProvider>) {
    let catalog = Catalog::from_entries(vec![
        (1, "A"),
        (2, "B"),
        (3, "C"),
        (4, "D"),
        (5, "E"),
        (6, "F"),
    ]);
    let matrix = SimilarityMatrix::from_rows(vec![
        vec![1.0, 0.9, 0.9, 0.5, 0.2, 0.1],
        vec![0.9, 1.0, 0.3, 0.3, 0.3, 0.3],
        vec![0.9, 0.3, 1.0, 0.4, 0.6, 0.2],
        vec![0.5, 0.3, 0.4, 1.0, 0.7, 0.8],
        vec![0.2, 0.3, 0.6, 0.7, 1.0, 0.1],
        vec![0.1, 0.3, 0.2, 0.8, 0.1, 1.0],
    ])
    .unwrap();
    let artifacts = Artifacts::new(catalog, matrix).unwrap();

    let provider = Arc::new(FakeProvider::default());
    let metadata = MetadataLookup::new(provider.clone(), ImageUrls::default(), NeverEvict);

    let app = create_router(Arc::new(AppState::new(artifacts, metadata)));
    (TestServer::new(app).unwrap(), provider)
}

#[tokio::test]
async fn test_health_check() {
    let (server, _) = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_list_titles_in_catalog_order() {
    let (server, _) = create_test_server();

    let response = server.get("/api/v1/titles").await;
    response.assert_status_ok();

    let titles: Vec<serde_json::Value> = response.json();
    assert_eq!(titles.len(), 6);
    assert_eq!(titles[0]["title"], "A");
    assert_eq!(titles[5]["id"], 6);
    assert_eq!(titles[5]["position"], 5);
}

#[tokio::test]
async fn test_recommendations_by_title() {
    let (server, _) = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["query"]["title"], "A");
    assert_eq!(
        body["query"]["poster_url"],
        "https://image.tmdb.org/t/p/w500/poster1.jpg"
    );
    assert_eq!(
        body["query"]["backdrop_url"],
        "https://image.tmdb.org/t/p/original/backdrop1.jpg"
    );

    let titles: Vec<&str> = body["recommendations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["B", "C", "D", "E", "F"]);
}

#[tokio::test]
async fn test_metadata_failures_degrade_to_placeholder() {
    let (server, _) = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "A")
        .await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    let placeholder = "https://via.placeholder.com/500x750?text=No+Poster";
    // E has no poster, F fails upstream
    assert_eq!(body["recommendations"][3]["poster_url"], placeholder);
    assert_eq!(body["recommendations"][4]["poster_url"], placeholder);
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let (server, _) = create_test_server();

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("title", "Zardoz")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Zardoz"));
}

#[tokio::test]
async fn test_recommendations_by_id() {
    let (server, _) = create_test_server();

    let response = server.get("/api/v1/movies/4/recommendations").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert_eq!(body["query"]["title"], "D");
    assert_eq!(body["recommendations"][0]["title"], "F");
    assert_eq!(body["recommendations"][0]["score"], 0.8);

    let response = server.get("/api/v1/movies/999/recommendations").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assets_are_fetched_once_per_movie() {
    let (server, provider) = create_test_server();

    for _ in 0..3 {
        let response = server.get("/api/v1/movies/2/assets").await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["poster_url"], "https://image.tmdb.org/t/p/w500/poster2.jpg");
    }

    assert_eq!(provider.fetches.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_page_without_selection() {
    let (server, provider) = create_test_server();

    let response = server.get("/").await;
    response.assert_status_ok();

    let html = response.text();
    assert!(html.contains("<option value=\"A\" selected>A</option>"));
    assert!(!html.contains("Recommended Movies"));
    assert_eq!(provider.fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_page_submit_and_pick() {
    let (server, _) = create_test_server();

    let response = server.get("/").add_query_param("movie", "A").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<option value=\"A\" selected>A</option>"));
    assert!(html.contains("href=\"/?pick=B\""));
    assert!(html.contains("backdrop1.jpg"));

    let response = server.get("/").add_query_param("pick", "D").await;
    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<option value=\"D\" selected>D</option>"));
    assert!(html.contains("href=\"/?pick=F\""));
}

#[tokio::test]
async fn test_page_unknown_title_is_not_fatal() {
    let (server, _) = create_test_server();

    let response = server.get("/").add_query_param("movie", "Zardoz").await;
    response.assert_status_ok();
    assert!(response.text().contains("Movie &#39;Zardoz&#39; is not in the catalog"));
}
