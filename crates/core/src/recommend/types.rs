//! Result value types for recommendation calls.

use crate::error::RecommendError;
use serde::{Deserialize, Serialize};

/// A recommended product with its score.
///
/// Score semantics depend on the strategy that produced it — see
/// [`ScoreKind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Product identifier.
    pub product: String,
    /// Ranking score (interpretation depends on the strategy).
    pub score: f32,
}

/// Which score column a recommendation table carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    /// Dense pairwise content similarity.
    SimilarityScore,
    /// Co-purchase count.
    CoPurchaseCount,
    /// Co-quotation count.
    CoQuotationCount,
    /// Weighted reciprocal-rank-fusion score.
    HybridScore,
    /// Accumulated item-similarity score from purchase history.
    RecommendationScore,
}

impl ScoreKind {
    /// Column name as exposed to callers.
    pub fn column_name(&self) -> &'static str {
        match self {
            ScoreKind::SimilarityScore => "similarity_score",
            ScoreKind::CoPurchaseCount => "co_purchase_count",
            ScoreKind::CoQuotationCount => "co_quotation_count",
            ScoreKind::HybridScore => "hybrid_score",
            ScoreKind::RecommendationScore => "recommendation_score",
        }
    }
}

/// Machine-readable outcome of a facade recommendation call.
///
/// `Ok` with zero rows means "legitimately nothing to recommend"; every
/// other variant names the failure that degraded the call to an empty table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendStatus {
    /// Scoring ran; rows hold whatever it produced (possibly nothing).
    Ok,
    /// The backing artifact failed to load.
    ArtifactUnavailable,
    /// The historical artifact's readiness flag is false.
    ArtifactNotReady,
    /// The product is absent from the artifact's index.
    UnknownProduct,
    /// The customer is absent from the artifact's index.
    UnknownCustomer,
}

impl From<&RecommendError> for RecommendStatus {
    fn from(err: &RecommendError) -> Self {
        match err {
            RecommendError::ArtifactUnavailable(_) => RecommendStatus::ArtifactUnavailable,
            RecommendError::ArtifactNotReady => RecommendStatus::ArtifactNotReady,
            RecommendError::UnknownProduct(_) => RecommendStatus::UnknownProduct,
            RecommendError::UnknownCustomer(_) => RecommendStatus::UnknownCustomer,
        }
    }
}

impl RecommendStatus {
    /// Stable lowercase tag for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendStatus::Ok => "ok",
            RecommendStatus::ArtifactUnavailable => "artifact_unavailable",
            RecommendStatus::ArtifactNotReady => "artifact_not_ready",
            RecommendStatus::UnknownProduct => "unknown_product",
            RecommendStatus::UnknownCustomer => "unknown_customer",
        }
    }
}

/// An ordered recommendation list with a defined score column and outcome.
///
/// The rows are descending by score, hold no duplicate products, exclude the
/// query product, and are at most the requested length. An empty table still
/// has a defined `score_kind` and a `status` explaining why it is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationTable {
    /// Which score column the rows carry.
    pub score_kind: ScoreKind,
    /// Outcome of the call.
    pub status: RecommendStatus,
    /// Ranked rows, descending by score.
    pub rows: Vec<Recommendation>,
}

impl RecommendationTable {
    /// Wraps a typed result into the never-fails table contract.
    pub fn from_result(
        score_kind: ScoreKind,
        result: Result<Vec<Recommendation>, RecommendError>,
    ) -> Self {
        match result {
            Ok(rows) => Self {
                score_kind,
                status: RecommendStatus::Ok,
                rows,
            },
            Err(err) => Self {
                score_kind,
                status: RecommendStatus::from(&err),
                rows: Vec::new(),
            },
        }
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ok_result() {
        let rows = vec![Recommendation {
            product: "a".into(),
            score: 0.5,
        }];
        let table = RecommendationTable::from_result(ScoreKind::SimilarityScore, Ok(rows.clone()));
        assert_eq!(table.status, RecommendStatus::Ok);
        assert_eq!(table.rows, rows);
    }

    #[test]
    fn test_from_err_result_is_empty_with_status() {
        let table = RecommendationTable::from_result(
            ScoreKind::HybridScore,
            Err(RecommendError::UnknownProduct("x".into())),
        );
        assert!(table.is_empty());
        assert_eq!(table.status, RecommendStatus::UnknownProduct);
        assert_eq!(table.score_kind, ScoreKind::HybridScore);
    }

    #[test]
    fn test_column_names() {
        assert_eq!(ScoreKind::CoPurchaseCount.column_name(), "co_purchase_count");
        assert_eq!(
            ScoreKind::RecommendationScore.column_name(),
            "recommendation_score"
        );
    }
}
