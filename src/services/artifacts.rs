use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, SimilarityMatrix},
};

/// The precomputed data the recommender runs on, loaded once at startup
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub catalog: Catalog,
    pub matrix: SimilarityMatrix,
}

impl Artifacts {
    /// Pairs a catalog with its matrix, enforcing `catalog.len() == matrix.dim()`.
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> AppResult<Self> {
        if catalog.len() != matrix.dim() {
            return Err(AppError::DimensionMismatch {
                catalog: catalog.len(),
                rows: matrix.dim(),
            });
        }
        Ok(Self { catalog, matrix })
    }

    pub fn from_readers<C: Read, S: Read>(catalog: C, similarity: S) -> AppResult<Self> {
        let matrix = SimilarityMatrix::from_reader(similarity)?;
        let catalog = Catalog::from_reader(catalog)?;
        Self::new(catalog, matrix)
    }
}

/// Loads and validates both startup artifacts from disk.
pub fn load_artifacts(
    catalog_path: impl AsRef<Path>,
    similarity_path: impl AsRef<Path>,
) -> AppResult<Artifacts> {
    let catalog_path = catalog_path.as_ref();
    let similarity_path = similarity_path.as_ref();

    let catalog = BufReader::new(open(catalog_path)?);
    let similarity = BufReader::new(open(similarity_path)?);
    let artifacts = Artifacts::from_readers(catalog, similarity)?;

    tracing::info!(
        catalog = %catalog_path.display(),
        similarity = %similarity_path.display(),
        movies = artifacts.catalog.len(),
        "Loaded recommendation artifacts"
    );

    Ok(artifacts)
}

fn open(path: &Path) -> AppResult<File> {
    File::open(path).map_err(|e| {
        AppError::InvalidArtifact(format!("Cannot open {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {"id": 19995, "title": "Avatar"},
        {"id": 679, "title": "Aliens"},
        {"id": 8077, "title": "Alien 3"}
    ]"#;

    #[test]
    fn test_matching_dimensions_load() {
        let similarity = "[[1, 0.5, 0.4], [0.5, 1, 0.3], [0.4, 0.3, 1]]";
        let artifacts =
            Artifacts::from_readers(CATALOG.as_bytes(), similarity.as_bytes()).unwrap();

        assert_eq!(artifacts.catalog.len(), 3);
        assert_eq!(artifacts.matrix.dim(), 3);
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let similarity = "[[1, 0.5], [0.5, 1]]";
        let err = Artifacts::from_readers(CATALOG.as_bytes(), similarity.as_bytes()).unwrap_err();

        assert!(err.is_load_error());
        assert!(matches!(
            err,
            AppError::DimensionMismatch {
                catalog: 3,
                rows: 2
            }
        ));
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = load_artifacts("/nonexistent/catalog.json", "/nonexistent/similarity.json")
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArtifact(ref msg) if msg.contains("catalog.json")));
    }
}
