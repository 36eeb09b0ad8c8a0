//! Typed failure reasons for recommendation calls.
//!
//! Every recommender returns `Result<Vec<Recommendation>, RecommendError>` so
//! callers can distinguish "legitimately nothing to recommend" (`Ok` with an
//! empty list) from an actual failure. The [`RecommenderContext`] facade
//! downgrades these errors to empty tables for callers that want the
//! never-fails contract.
//!
//! [`RecommenderContext`]: crate::recommend::RecommenderContext

use thiserror::Error;

/// A recommendation call failed before any scoring could happen.
///
/// Size mismatches between related matrices are deliberately *not* an error:
/// offending entries are skipped during scoring so a slightly inconsistent
/// artifact still degrades gracefully.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The artifact backing this strategy failed to load.
    #[error("artifact '{0}' is not available")]
    ArtifactUnavailable(&'static str),

    /// The historical artifact's readiness flag is false.
    #[error("historical artifact is not ready")]
    ArtifactNotReady,

    /// The product is absent from the artifact's index mapping.
    #[error("product '{0}' not found in artifact index")]
    UnknownProduct(String),

    /// The customer is absent from the historical artifact's index mapping.
    #[error("customer {0} not found in artifact index")]
    UnknownCustomer(i64),
}

impl RecommendError {
    /// Stable machine-readable tag, used for log fields and metrics labels.
    pub fn reason(&self) -> &'static str {
        match self {
            RecommendError::ArtifactUnavailable(_) => "artifact_unavailable",
            RecommendError::ArtifactNotReady => "artifact_not_ready",
            RecommendError::UnknownProduct(_) => "unknown_product",
            RecommendError::UnknownCustomer(_) => "unknown_customer",
        }
    }
}
