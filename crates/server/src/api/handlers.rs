//! HTTP request handlers and shared application state.

use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::*;
use axum::extract::State;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use recstack_core::config;
use recstack_core::recommend::{HybridParams, RecommenderContext};
use std::sync::Arc;
use std::time::Instant;

/// Shared application state passed to every handler via Axum's `State`
/// extractor.
///
/// The context is immutable and established before the listener starts, so
/// handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    /// Loaded artifacts, shared read-only.
    pub ctx: Arc<RecommenderContext>,
    /// Prometheus render handle for `GET /metrics`.
    pub prometheus_handle: PrometheusHandle,
    /// Process start, for uptime reporting.
    pub start_time: Instant,
}

fn validate_n(n: usize) -> Result<(), ApiError> {
    if n > config::MAX_TOP_N {
        return Err(ApiError::BadRequest(format!(
            "n must be at most {}",
            config::MAX_TOP_N
        )));
    }
    Ok(())
}

fn validate_weight(name: &str, value: f32) -> Result<(), ApiError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::BadRequest(format!(
            "{name} must be a finite nonnegative number"
        )));
    }
    Ok(())
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let artifacts_loaded = [
        state.ctx.content.is_some(),
        state.ctx.co_purchase.is_some(),
        state.ctx.co_quotation.is_some(),
        state.ctx.historical.is_some(),
    ]
    .iter()
    .filter(|&&loaded| loaded)
    .count();

    Json(HealthResponse {
        status: if artifacts_loaded > 0 { "ok" } else { "degraded" }.to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        artifacts_loaded,
    })
}

/// `GET /artifacts`
pub async fn artifacts(State(state): State<AppState>) -> Json<ArtifactsResponse> {
    let ctx = &state.ctx;

    let content = match &ctx.content {
        Some(a) => ArtifactStatus {
            loaded: true,
            products: Some(a.products.len()),
            ..ArtifactStatus::unavailable()
        },
        None => ArtifactStatus::unavailable(),
    };
    let co_purchase = match &ctx.co_purchase {
        Some(a) => ArtifactStatus {
            loaded: true,
            products: Some(a.products.len()),
            pairs: Some(a.counts.nnz()),
            ..ArtifactStatus::unavailable()
        },
        None => ArtifactStatus::unavailable(),
    };
    let co_quotation = match &ctx.co_quotation {
        Some(a) => ArtifactStatus {
            loaded: true,
            products: Some(a.products.len()),
            pairs: Some(a.counts.nnz()),
            ..ArtifactStatus::unavailable()
        },
        None => ArtifactStatus::unavailable(),
    };
    let historical = match &ctx.historical {
        Some(a) => ArtifactStatus {
            loaded: true,
            customers: Some(a.customers.len()),
            items: Some(a.items.len()),
            ready: Some(a.ready),
            ..ArtifactStatus::unavailable()
        },
        None => ArtifactStatus::unavailable(),
    };

    Json(ArtifactsResponse {
        content,
        co_purchase,
        co_quotation,
        historical,
    })
}

/// `GET /metrics`
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    state.prometheus_handle.render()
}

/// `POST /recommend/content`
pub async fn recommend_content(
    State(state): State<AppState>,
    Json(req): Json<ProductRecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    validate_n(req.n)?;
    let table = state.ctx.content_recommend(&req.product, req.n);
    metrics::record_recommendation("content", table.status.as_str());
    Ok(Json(table.into()))
}

/// `POST /recommend/co-purchase`
pub async fn recommend_co_purchase(
    State(state): State<AppState>,
    Json(req): Json<ProductRecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    validate_n(req.n)?;
    let table = state.ctx.co_purchase_recommend(&req.product, req.n);
    metrics::record_recommendation("co_purchase", table.status.as_str());
    Ok(Json(table.into()))
}

/// `POST /recommend/co-quotation`
pub async fn recommend_co_quotation(
    State(state): State<AppState>,
    Json(req): Json<ProductRecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    validate_n(req.n)?;
    let table = state.ctx.co_quotation_recommend(&req.product, req.n);
    metrics::record_recommendation("co_quotation", table.status.as_str());
    Ok(Json(table.into()))
}

/// `POST /recommend/hybrid`
pub async fn recommend_hybrid(
    State(state): State<AppState>,
    Json(req): Json<HybridRecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    validate_n(req.n)?;

    let defaults = HybridParams::default();
    let params = HybridParams {
        content_weight: req.content_weight.unwrap_or(defaults.content_weight),
        co_purchase_weight: req.co_purchase_weight.unwrap_or(defaults.co_purchase_weight),
        co_quotation_weight: req
            .co_quotation_weight
            .unwrap_or(defaults.co_quotation_weight),
        smoothing: req.smoothing.unwrap_or(defaults.smoothing),
    };
    validate_weight("content_weight", params.content_weight)?;
    validate_weight("co_purchase_weight", params.co_purchase_weight)?;
    validate_weight("co_quotation_weight", params.co_quotation_weight)?;
    validate_weight("smoothing", params.smoothing)?;

    let table = state.ctx.hybrid_recommend(&req.product, req.n, params);
    metrics::record_recommendation("hybrid", table.status.as_str());
    Ok(Json(table.into()))
}

/// `POST /recommend/historical`
pub async fn recommend_historical(
    State(state): State<AppState>,
    Json(req): Json<HistoricalRecommendRequest>,
) -> Result<Json<RecommendResponse>, ApiError> {
    validate_n(req.n)?;
    if req.top_k_per_item > config::MAX_TOP_K_PER_ITEM {
        return Err(ApiError::BadRequest(format!(
            "top_k_per_item must be at most {}",
            config::MAX_TOP_K_PER_ITEM
        )));
    }

    let table = state
        .ctx
        .historical_recommend(req.customer, req.n, req.top_k_per_item);
    metrics::record_recommendation("historical", table.status.as_str());
    Ok(Json(table.into()))
}
