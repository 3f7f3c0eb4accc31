use std::io::Read;

use crate::error::{AppError, AppResult};

/// Square matrix of precomputed pairwise similarity scores, indexed by catalog position.
///
/// Symmetry is not enforced and the diagonal is not assumed to hold the row maximum.
#[derive(Debug, Clone, Default)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<f64>, // row-major, dim * dim
}

impl SimilarityMatrix {
    /// Builds a matrix from rows, rejecting ragged rows and non-finite scores.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(AppError::NonSquareMatrix {
                    row,
                    expected: dim,
                    actual: values.len(),
                });
            }
            if let Some(col) = values.iter().position(|v| !v.is_finite()) {
                return Err(AppError::InvalidArtifact(format!(
                    "Similarity score at ({}, {}) is not a finite number",
                    row, col
                )));
            }
            scores.extend(values);
        }

        Ok(Self { dim, scores })
    }

    /// Parses the JSON similarity artifact (an array of rows).
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let rows: Vec<Vec<f64>> = serde_json::from_reader(reader)?;
        Self::from_rows(rows)
    }

    /// Number of rows, which equals the number of columns
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn row(&self, position: usize) -> Option<&[f64]> {
        if position >= self.dim {
            return None;
        }
        let start = position * self.dim;
        Some(&self.scores[start..start + self.dim])
    }
}
