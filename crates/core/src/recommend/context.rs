//! The recommender context: one immutable object holding every artifact.
//!
//! Hosts construct a [`RecommenderContext`] once (usually via
//! [`crate::artifact::loader::load_context`]), then share it read-only
//! across threads for the life of the process. Each strategy's artifact is
//! optional so a single failed load degrades only that strategy.
//!
//! Two call surfaces are exposed:
//! - typed accessors (`content_recommender()`, …) returning
//!   `Err(ArtifactUnavailable)` when the backing artifact is missing, and
//! - `*_recommend` table methods that never fail, degrading every error to
//!   an empty [`RecommendationTable`] with a machine-readable status and a
//!   log event.

use crate::artifact::content::ContentArtifact;
use crate::artifact::cooccurrence::{CoOccurrenceArtifact, CoOccurrenceKind};
use crate::artifact::historical::HistoricalArtifact;
use crate::error::RecommendError;
use crate::recommend::content::ContentRecommender;
use crate::recommend::cooccurrence::CoOccurrenceRecommender;
use crate::recommend::historical::HistoricalRecommender;
use crate::recommend::hybrid::{HybridFusionEngine, HybridParams};
use crate::recommend::types::{RecommendationTable, ScoreKind};
use tracing::warn;

/// Immutable bundle of loaded artifacts backing all strategies.
#[derive(Debug, Default)]
pub struct RecommenderContext {
    /// Content-similarity artifact, if loaded.
    pub content: Option<ContentArtifact>,
    /// Co-purchase artifact, if loaded.
    pub co_purchase: Option<CoOccurrenceArtifact>,
    /// Co-quotation artifact, if loaded.
    pub co_quotation: Option<CoOccurrenceArtifact>,
    /// Historical artifact, if loaded.
    pub historical: Option<HistoricalArtifact>,
}

impl RecommenderContext {
    /// A context with no artifacts; every call degrades to empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True if at least one artifact is loaded.
    pub fn any_loaded(&self) -> bool {
        self.content.is_some()
            || self.co_purchase.is_some()
            || self.co_quotation.is_some()
            || self.historical.is_some()
    }

    /// Typed access to the content strategy.
    pub fn content_recommender(&self) -> Result<ContentRecommender<'_>, RecommendError> {
        self.content
            .as_ref()
            .map(ContentRecommender::new)
            .ok_or(RecommendError::ArtifactUnavailable("content"))
    }

    /// Typed access to the co-purchase strategy.
    pub fn co_purchase_recommender(&self) -> Result<CoOccurrenceRecommender<'_>, RecommendError> {
        self.co_purchase
            .as_ref()
            .map(|a| CoOccurrenceRecommender::new(a, CoOccurrenceKind::Purchase))
            .ok_or(RecommendError::ArtifactUnavailable("co_purchase"))
    }

    /// Typed access to the co-quotation strategy.
    pub fn co_quotation_recommender(&self) -> Result<CoOccurrenceRecommender<'_>, RecommendError> {
        self.co_quotation
            .as_ref()
            .map(|a| CoOccurrenceRecommender::new(a, CoOccurrenceKind::Quotation))
            .ok_or(RecommendError::ArtifactUnavailable("co_quotation"))
    }

    /// Typed access to the hybrid fusion engine over whatever sources exist.
    pub fn hybrid_engine(&self) -> HybridFusionEngine<'_> {
        HybridFusionEngine::new(
            self.content.as_ref(),
            self.co_purchase.as_ref(),
            self.co_quotation.as_ref(),
        )
    }

    /// Typed access to the historical strategy.
    pub fn historical_recommender(&self) -> Result<HistoricalRecommender<'_>, RecommendError> {
        self.historical
            .as_ref()
            .map(HistoricalRecommender::new)
            .ok_or(RecommendError::ArtifactUnavailable("historical"))
    }

    /// Content recommendations as a never-fails table.
    pub fn content_recommend(&self, product: &str, n: usize) -> RecommendationTable {
        let result = self
            .content_recommender()
            .and_then(|r| r.recommend(product, n));
        Self::into_table(ScoreKind::SimilarityScore, result)
    }

    /// Co-purchase recommendations as a never-fails table.
    pub fn co_purchase_recommend(&self, product: &str, n: usize) -> RecommendationTable {
        let result = self
            .co_purchase_recommender()
            .and_then(|r| r.recommend(product, n));
        Self::into_table(ScoreKind::CoPurchaseCount, result)
    }

    /// Co-quotation recommendations as a never-fails table.
    pub fn co_quotation_recommend(&self, product: &str, n: usize) -> RecommendationTable {
        let result = self
            .co_quotation_recommender()
            .and_then(|r| r.recommend(product, n));
        Self::into_table(ScoreKind::CoQuotationCount, result)
    }

    /// Hybrid recommendations as a never-fails table.
    pub fn hybrid_recommend(
        &self,
        product: &str,
        n: usize,
        params: HybridParams,
    ) -> RecommendationTable {
        let result = self.hybrid_engine().recommend(product, n, params);
        Self::into_table(ScoreKind::HybridScore, result)
    }

    /// Historical recommendations as a never-fails table.
    pub fn historical_recommend(
        &self,
        customer: i64,
        n: usize,
        top_k_per_item: usize,
    ) -> RecommendationTable {
        let result = self
            .historical_recommender()
            .and_then(|r| r.recommend(customer, n, top_k_per_item));
        Self::into_table(ScoreKind::RecommendationScore, result)
    }

    fn into_table(
        kind: ScoreKind,
        result: Result<Vec<crate::recommend::types::Recommendation>, RecommendError>,
    ) -> RecommendationTable {
        if let Err(ref err) = result {
            warn!(
                score_kind = kind.column_name(),
                reason = err.reason(),
                error = %err,
                "recommendation degraded to empty table"
            );
        }
        RecommendationTable::from_result(kind, result)
    }
}
