//! Recommendation strategies and the shared context facade.
//!
//! Four single-strategy recommenders (content, co-purchase, co-quotation,
//! historical), the hybrid rank-fusion engine that merges the first three,
//! and [`RecommenderContext`], the immutable per-process bundle hosts pass
//! into every call.

/// Content-based recommendations over dense similarity.
pub mod content;
/// The per-process artifact bundle and call facade.
pub mod context;
/// Co-occurrence recommendations over sparse pair counts.
pub mod cooccurrence;
/// Item-based collaborative filtering from purchase history.
pub mod historical;
/// Weighted reciprocal rank fusion of the three product strategies.
pub mod hybrid;
/// Shared ranking and materialization routine.
pub mod rank;
/// Result value types.
pub mod types;

pub use content::ContentRecommender;
pub use context::RecommenderContext;
pub use cooccurrence::CoOccurrenceRecommender;
pub use historical::HistoricalRecommender;
pub use hybrid::{HybridFusionEngine, HybridParams};
pub use types::{Recommendation, RecommendationTable, RecommendStatus, ScoreKind};
