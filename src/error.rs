use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Catalog has {catalog} items but the similarity matrix has {rows} rows")]
    DimensionMismatch { catalog: usize, rows: usize },

    #[error("Similarity row {row} has {actual} columns, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate title in catalog: {0}")]
    DuplicateTitle(String),

    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Metadata fetch error: {0}")]
    MetadataFetch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Errors raised while loading the startup artifacts
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            AppError::DimensionMismatch { .. }
                | AppError::NonSquareMatrix { .. }
                | AppError::DuplicateTitle(_)
                | AppError::InvalidArtifact(_)
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::MetadataFetch(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::HttpClient(_) => (StatusCode::BAD_GATEWAY, self.to_string()),
            AppError::DimensionMismatch { .. }
            | AppError::NonSquareMatrix { .. }
            | AppError::DuplicateTitle(_)
            | AppError::InvalidArtifact(_)
            | AppError::Json(_)
            | AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
