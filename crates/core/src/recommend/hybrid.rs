//! Hybrid recommendations: weighted reciprocal rank fusion.
//!
//! Merges the ranked lists of the content, co-purchase and co-quotation
//! strategies into one list. A candidate at 1-based rank `r` in a source
//! list contributes `weight / (r + smoothing)`; contributions for the same
//! product are summed across sources, so a product surfaced by several
//! strategies outranks one surfaced by a single strategy at similar depth.

use crate::artifact::content::ContentArtifact;
use crate::artifact::cooccurrence::{CoOccurrenceArtifact, CoOccurrenceKind};
use crate::config;
use crate::error::RecommendError;
use crate::recommend::content::ContentRecommender;
use crate::recommend::cooccurrence::CoOccurrenceRecommender;
use crate::recommend::types::Recommendation;
use ordered_float::OrderedFloat;
use std::collections::HashMap;
use tracing::info;

/// Fusion weights and the rank smoothing constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HybridParams {
    /// Weight of the content-similarity list.
    pub content_weight: f32,
    /// Weight of the co-purchase list.
    pub co_purchase_weight: f32,
    /// Weight of the co-quotation list.
    pub co_quotation_weight: f32,
    /// Added to the 1-based rank in the denominator.
    pub smoothing: f32,
}

impl Default for HybridParams {
    fn default() -> Self {
        Self {
            content_weight: config::DEFAULT_CONTENT_WEIGHT,
            co_purchase_weight: config::DEFAULT_CO_PURCHASE_WEIGHT,
            co_quotation_weight: config::DEFAULT_CO_QUOTATION_WEIGHT,
            smoothing: config::DEFAULT_SMOOTHING,
        }
    }
}

/// Merges the three single-strategy recommenders with rank fusion.
///
/// Sources whose artifact is unavailable, or that do not know the query
/// product, contribute an empty list; fusion proceeds with whatever signal
/// exists.
#[derive(Debug, Clone, Copy)]
pub struct HybridFusionEngine<'a> {
    content: Option<&'a ContentArtifact>,
    co_purchase: Option<&'a CoOccurrenceArtifact>,
    co_quotation: Option<&'a CoOccurrenceArtifact>,
}

impl<'a> HybridFusionEngine<'a> {
    /// Creates an engine over whichever source artifacts are loaded.
    pub fn new(
        content: Option<&'a ContentArtifact>,
        co_purchase: Option<&'a CoOccurrenceArtifact>,
        co_quotation: Option<&'a CoOccurrenceArtifact>,
    ) -> Self {
        Self {
            content,
            co_purchase,
            co_quotation,
        }
    }

    /// Returns up to `n` products ranked by fused score.
    ///
    /// Candidate lists are fetched at a fixed depth
    /// ([`config::HYBRID_CANDIDATE_DEPTH`]), independent of `n`. Products
    /// absent from every source list never appear; the query product is
    /// excluded even if a source surfaced it.
    pub fn recommend(
        &self,
        product: &str,
        n: usize,
        params: HybridParams,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        if self.content.is_none() && self.co_purchase.is_none() && self.co_quotation.is_none() {
            return Err(RecommendError::ArtifactUnavailable("hybrid"));
        }

        let depth = config::HYBRID_CANDIDATE_DEPTH;
        let mut known = false;

        let content_list = match self.content {
            Some(artifact) => match ContentRecommender::new(artifact).recommend(product, depth) {
                Ok(list) => {
                    known = true;
                    list
                }
                Err(_) => Vec::new(),
            },
            None => Vec::new(),
        };
        let co_purchase_list = match self.co_purchase {
            Some(artifact) => {
                match CoOccurrenceRecommender::new(artifact, CoOccurrenceKind::Purchase)
                    .recommend(product, depth)
                {
                    Ok(list) => {
                        known = true;
                        list
                    }
                    Err(_) => Vec::new(),
                }
            }
            None => Vec::new(),
        };
        let co_quotation_list = match self.co_quotation {
            Some(artifact) => {
                match CoOccurrenceRecommender::new(artifact, CoOccurrenceKind::Quotation)
                    .recommend(product, depth)
                {
                    Ok(list) => {
                        known = true;
                        list
                    }
                    Err(_) => Vec::new(),
                }
            }
            None => Vec::new(),
        };

        if !known {
            return Err(RecommendError::UnknownProduct(product.to_string()));
        }

        // Weak co-purchase signal: fall back to the default weight profile.
        // TODO: the fallback profile currently equals the defaults; swap in
        // dedicated low-signal weights once they are decided.
        let mut params = params;
        if let Some(top) = co_purchase_list.first() {
            if top.score < config::WEAK_CO_PURCHASE_THRESHOLD {
                params = HybridParams::default();
            }
        }

        let mut fused: HashMap<String, f32> = HashMap::with_capacity(
            content_list.len() + co_purchase_list.len() + co_quotation_list.len(),
        );
        let sources = [
            (&content_list, params.content_weight),
            (&co_purchase_list, params.co_purchase_weight),
            (&co_quotation_list, params.co_quotation_weight),
        ];
        for (list, weight) in sources {
            for (rank, rec) in list.iter().enumerate() {
                let contribution = weight / (rank as f32 + 1.0 + params.smoothing);
                *fused.entry(rec.product.clone()).or_insert(0.0) += contribution;
            }
        }
        fused.remove(product);

        if fused.is_empty() {
            info!(product, "no hybrid candidates from any source");
            return Ok(Vec::new());
        }

        let mut ranked: Vec<(String, f32)> = fused.into_iter().collect();
        ranked.sort_unstable_by(|a, b| {
            OrderedFloat(b.1)
                .cmp(&OrderedFloat(a.1))
                .then_with(|| a.0.cmp(&b.0))
        });
        ranked.truncate(n);

        Ok(ranked
            .into_iter()
            .map(|(product, score)| Recommendation { product, score })
            .collect())
    }
}
