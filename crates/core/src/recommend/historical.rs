//! Historical recommendations: item-based collaborative filtering.
//!
//! For each item a customer has purchased, the most similar items (by the
//! precomputed item-item matrix) contribute their similarity to a running
//! per-candidate score. An item similar to several purchased items
//! accumulates more score. Candidates are not filtered against the
//! customer's own purchases, so already-bought items can appear in the
//! result.

use crate::artifact::historical::HistoricalArtifact;
use crate::error::RecommendError;
use crate::recommend::rank::materialize_ranked;
use crate::recommend::types::Recommendation;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Scores products for a customer from their purchase history.
#[derive(Debug, Clone, Copy)]
pub struct HistoricalRecommender<'a> {
    artifact: &'a HistoricalArtifact,
}

impl<'a> HistoricalRecommender<'a> {
    /// Creates a recommender over a loaded historical artifact.
    pub fn new(artifact: &'a HistoricalArtifact) -> Self {
        Self { artifact }
    }

    /// Returns up to `n` products for `customer`, descending by accumulated
    /// similarity score. `top_k_per_item` bounds how many similar items each
    /// purchased item contributes.
    ///
    /// A customer with no purchase history yields an empty list (`Ok`).
    /// Purchased items whose index falls outside the similarity matrix are
    /// skipped, tolerating artifact-size mismatches.
    pub fn recommend(
        &self,
        customer: i64,
        n: usize,
        top_k_per_item: usize,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let artifact = self.artifact;

        if !artifact.ready {
            warn!(customer, "historical artifact is not ready");
            return Err(RecommendError::ArtifactNotReady);
        }
        let Some(user_idx) = artifact.customers.index_of(&customer) else {
            warn!(customer, "historical recommendation requested for unknown customer");
            return Err(RecommendError::UnknownCustomer(customer));
        };
        let Some((purchased, _)) = artifact.user_item.row(user_idx as usize) else {
            warn!(
                customer,
                index = user_idx,
                rows = artifact.user_item.rows(),
                "customer index outside user-item matrix"
            );
            return Ok(Vec::new());
        };
        if purchased.is_empty() {
            info!(customer, "customer has no purchase history");
            return Ok(Vec::new());
        }

        let mut accumulated: HashMap<u32, f32> = HashMap::new();
        for &item_idx in purchased {
            let Some(similarities) = artifact.item_similarity.row(item_idx as usize) else {
                debug!(
                    customer,
                    item = item_idx,
                    rows = artifact.item_similarity.rows,
                    "purchased item outside similarity matrix, skipping"
                );
                continue;
            };

            let mut ranked: Vec<(u32, f32)> = similarities
                .iter()
                .enumerate()
                .map(|(j, &score)| (j as u32, score))
                .collect();
            ranked.sort_unstable_by_key(|&(j, score)| (Reverse(OrderedFloat(score)), j));

            for &(candidate, similarity) in ranked.iter().take(top_k_per_item) {
                if similarity > 0.0 {
                    *accumulated.entry(candidate).or_insert(0.0) += similarity;
                }
            }
        }

        if accumulated.is_empty() {
            info!(customer, "no similar items found for purchase history");
            return Ok(Vec::new());
        }

        let scored: Vec<(u32, f32)> = accumulated.into_iter().collect();
        Ok(materialize_ranked(scored, None, &artifact.items, n))
    }
}
