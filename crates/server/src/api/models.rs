//! Request and response data transfer objects for the REST API.
//!
//! All types derive `Serialize` and/or `Deserialize` for JSON marshalling
//! via Axum.

use recstack_core::config;
use recstack_core::recommend::{Recommendation, RecommendationTable, RecommendStatus};
use serde::{Deserialize, Serialize};

fn default_n() -> usize {
    config::DEFAULT_TOP_N
}

fn default_top_k_per_item() -> usize {
    config::DEFAULT_TOP_K_PER_ITEM
}

/// Request body for the single-strategy product endpoints.
#[derive(Debug, Deserialize)]
pub struct ProductRecommendRequest {
    /// Query product identifier.
    pub product: String,
    /// Maximum number of rows to return.
    #[serde(default = "default_n")]
    pub n: usize,
}

/// Request body for `POST /recommend/hybrid`.
///
/// Omitted weights fall back to the configured defaults.
#[derive(Debug, Deserialize)]
pub struct HybridRecommendRequest {
    /// Query product identifier.
    pub product: String,
    /// Maximum number of rows to return.
    #[serde(default = "default_n")]
    pub n: usize,
    /// Weight of the content-similarity source.
    pub content_weight: Option<f32>,
    /// Weight of the co-purchase source.
    pub co_purchase_weight: Option<f32>,
    /// Weight of the co-quotation source.
    pub co_quotation_weight: Option<f32>,
    /// Rank smoothing constant.
    pub smoothing: Option<f32>,
}

/// Request body for `POST /recommend/historical`.
#[derive(Debug, Deserialize)]
pub struct HistoricalRecommendRequest {
    /// Query customer identifier.
    pub customer: i64,
    /// Maximum number of rows to return.
    #[serde(default = "default_n")]
    pub n: usize,
    /// Similar items considered per purchased item.
    #[serde(default = "default_top_k_per_item")]
    pub top_k_per_item: usize,
}

/// Response body for every recommendation endpoint.
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    /// Name of the score column (`similarity_score`, `co_purchase_count`, …).
    pub score_kind: &'static str,
    /// Outcome: `ok`, or the failure that produced an empty table.
    pub status: RecommendStatus,
    /// Ranked rows, descending by score. Empty on failure.
    pub rows: Vec<Recommendation>,
}

impl From<RecommendationTable> for RecommendResponse {
    fn from(table: RecommendationTable) -> Self {
        Self {
            score_kind: table.score_kind.column_name(),
            status: table.status,
            rows: table.rows,
        }
    }
}

/// Per-artifact load status for `GET /artifacts`.
#[derive(Debug, Serialize)]
pub struct ArtifactStatus {
    /// Whether the snapshot loaded and validated.
    pub loaded: bool,
    /// Product count, for product-keyed artifacts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub products: Option<usize>,
    /// Stored co-occurrence pair count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairs: Option<usize>,
    /// Customer count, for the historical artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customers: Option<usize>,
    /// Item count, for the historical artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<usize>,
    /// Readiness flag, for the historical artifact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
}

impl ArtifactStatus {
    /// Status for an artifact that failed to load.
    pub fn unavailable() -> Self {
        Self {
            loaded: false,
            products: None,
            pairs: None,
            customers: None,
            items: None,
            ready: None,
        }
    }
}

/// Response body for `GET /artifacts`.
#[derive(Debug, Serialize)]
pub struct ArtifactsResponse {
    pub content: ArtifactStatus,
    pub co_purchase: ArtifactStatus,
    pub co_quotation: ArtifactStatus,
    pub historical: ArtifactStatus,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when at least one artifact is serving, else `"degraded"`.
    pub status: String,
    /// Seconds since process start.
    pub uptime_secs: u64,
    /// Number of loaded artifacts (of 4).
    pub artifacts_loaded: usize,
}
