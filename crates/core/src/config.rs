//! Global configuration constants for recstack.
//!
//! All tuning parameters, input validation limits, and server defaults are
//! defined here. These are compile-time constants; runtime configuration is
//! handled via CLI arguments and environment variables in `main.rs`.

/// Default number of recommendations returned per call.
pub const DEFAULT_TOP_N: usize = 10;

/// Maximum number of recommendations (`n`) per request.
pub const MAX_TOP_N: usize = 1_000;

/// Candidate list depth requested from each source strategy during hybrid
/// fusion. Fixed, independent of the caller's requested `n`.
pub const HYBRID_CANDIDATE_DEPTH: usize = 50;

/// Default weight of the content-similarity source in hybrid fusion.
pub const DEFAULT_CONTENT_WEIGHT: f32 = 0.3;

/// Default weight of the co-purchase source in hybrid fusion.
pub const DEFAULT_CO_PURCHASE_WEIGHT: f32 = 0.5;

/// Default weight of the co-quotation source in hybrid fusion.
pub const DEFAULT_CO_QUOTATION_WEIGHT: f32 = 0.2;

/// Default rank smoothing constant for reciprocal rank fusion.
///
/// A candidate at 1-based rank `r` contributes `weight / (r + smoothing)`.
pub const DEFAULT_SMOOTHING: f32 = 2.0;

/// Co-purchase count below which the top co-purchase signal is considered
/// weak and the hybrid weights fall back to the default profile.
pub const WEAK_CO_PURCHASE_THRESHOLD: f32 = 10.0;

/// Default number of most-similar items considered per purchased item in
/// historical (item-based collaborative) scoring.
pub const DEFAULT_TOP_K_PER_ITEM: usize = 30;

/// Maximum `top_k_per_item` per historical request.
pub const MAX_TOP_K_PER_ITEM: usize = 1_000;

/// Default HTTP server port.
pub const DEFAULT_PORT: u16 = 4040;

/// Default directory holding artifact snapshot files.
pub const DEFAULT_ARTIFACT_DIR: &str = "./artifacts";

/// Maximum HTTP request body size in bytes (1 MB).
///
/// Recommendation requests are small; anything larger is malformed.
pub const MAX_REQUEST_BODY_BYTES: usize = 1024 * 1024;
