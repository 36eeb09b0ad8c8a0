//! Co-occurrence recommendations over sparse pair counts.
//!
//! One algorithm, two instances: co-purchase and co-quotation run the same
//! ranking over disjoint artifacts and share nothing but code.

use crate::artifact::cooccurrence::{CoOccurrenceArtifact, CoOccurrenceKind};
use crate::error::RecommendError;
use crate::recommend::rank::materialize_ranked;
use crate::recommend::types::Recommendation;
use tracing::{info, warn};

/// Ranks products by how often they co-occur with the query product.
#[derive(Debug, Clone, Copy)]
pub struct CoOccurrenceRecommender<'a> {
    artifact: &'a CoOccurrenceArtifact,
    kind: CoOccurrenceKind,
}

impl<'a> CoOccurrenceRecommender<'a> {
    /// Creates a recommender over a loaded co-occurrence artifact.
    pub fn new(artifact: &'a CoOccurrenceArtifact, kind: CoOccurrenceKind) -> Self {
        Self { artifact, kind }
    }

    /// Which paired event this instance counts.
    pub fn kind(&self) -> CoOccurrenceKind {
        self.kind
    }

    /// Returns up to `n` products most often co-occurring with `product`,
    /// descending by count.
    ///
    /// A known product with no recorded co-occurrences yields an empty list
    /// (`Ok`), distinguishable from the unknown-product error.
    pub fn recommend(
        &self,
        product: &str,
        n: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let Some(idx) = self.artifact.products.index_of(product) else {
            warn!(
                product,
                kind = self.kind.as_str(),
                "co-occurrence recommendation requested for unknown product"
            );
            return Err(RecommendError::UnknownProduct(product.to_string()));
        };

        let Some((cols, counts)) = self.artifact.counts.row(idx as usize) else {
            warn!(
                product,
                index = idx,
                rows = self.artifact.counts.rows(),
                kind = self.kind.as_str(),
                "product index outside co-occurrence matrix"
            );
            return Ok(Vec::new());
        };

        if cols.is_empty() {
            info!(
                product,
                kind = self.kind.as_str(),
                "product has no recorded co-occurrences"
            );
            return Ok(Vec::new());
        }

        let scored: Vec<(u32, f32)> = cols.iter().copied().zip(counts.iter().copied()).collect();

        Ok(materialize_ranked(
            scored,
            Some(idx),
            &self.artifact.products,
            n,
        ))
    }
}
