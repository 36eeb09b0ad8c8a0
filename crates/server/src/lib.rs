//! recstack-server — HTTP serving layer for recstack.
//!
//! Exposes the recommendation strategies over a JSON REST API. All scoring
//! logic lives in `recstack-core`; this crate loads the artifacts once at
//! startup and serves read-only traffic against them.

/// REST API layer: Axum router, HTTP handlers, models, and metrics.
pub mod api;
