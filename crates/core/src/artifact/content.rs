//! Content-similarity artifact: dense pairwise product similarity.

use crate::artifact::index::IdIndex;
use crate::artifact::matrix::DenseMatrix;
use serde::{Deserialize, Serialize};

/// Precomputed content-similarity artifact.
///
/// `similarity[i][j]` is the similarity of product `i` to product `j`.
/// Produced by an external training pipeline and consumed read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentArtifact {
    /// Dense square similarity matrix.
    pub similarity: DenseMatrix,
    /// Product ↔ row index mapping.
    pub products: IdIndex<String>,
}

impl ContentArtifact {
    /// Validate internal invariants after deserialization.
    ///
    /// The matrix must be square and its side must match the mapping size.
    pub fn validate(&self) -> Result<(), String> {
        self.similarity.validate()?;
        self.products.validate()?;
        if !self.similarity.is_square() {
            return Err(format!(
                "similarity matrix is {}x{}, expected square",
                self.similarity.rows, self.similarity.cols
            ));
        }
        if self.similarity.rows != self.products.len() {
            return Err(format!(
                "similarity side {} != product mapping size {}",
                self.similarity.rows,
                self.products.len()
            ));
        }
        Ok(())
    }
}
