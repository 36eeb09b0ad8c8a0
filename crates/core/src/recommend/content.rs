//! Content-based recommendations over a dense similarity matrix.

use crate::artifact::content::ContentArtifact;
use crate::error::RecommendError;
use crate::recommend::rank::materialize_ranked;
use crate::recommend::types::Recommendation;
use tracing::warn;

/// Ranks products by dense pairwise content similarity to the query product.
#[derive(Debug, Clone, Copy)]
pub struct ContentRecommender<'a> {
    artifact: &'a ContentArtifact,
}

impl<'a> ContentRecommender<'a> {
    /// Creates a recommender over a loaded content artifact.
    pub fn new(artifact: &'a ContentArtifact) -> Self {
        Self { artifact }
    }

    /// Returns up to `n` products most similar to `product`, descending by
    /// similarity score.
    ///
    /// The full similarity row is ranked, so low or zero similarities are
    /// still eligible to fill the list. The query product itself never
    /// appears.
    pub fn recommend(
        &self,
        product: &str,
        n: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let Some(idx) = self.artifact.products.index_of(product) else {
            warn!(product, "content recommendation requested for unknown product");
            return Err(RecommendError::UnknownProduct(product.to_string()));
        };

        let Some(row) = self.artifact.similarity.row(idx as usize) else {
            // Mapping and matrix disagree; skip rather than fail.
            warn!(
                product,
                index = idx,
                rows = self.artifact.similarity.rows,
                "product index outside similarity matrix"
            );
            return Ok(Vec::new());
        };

        let scored: Vec<(u32, f32)> = row
            .iter()
            .enumerate()
            .map(|(j, &score)| (j as u32, score))
            .collect();

        Ok(materialize_ranked(
            scored,
            Some(idx),
            &self.artifact.products,
            n,
        ))
    }
}
