//! Shared ranking and materialization routine.
//!
//! Every strategy ends the same way: sort scored indices descending, drop
//! the query's own index, map surviving indices back to product identifiers
//! (skipping indices with no canonical identifier), and truncate. Keeping
//! that in one place guarantees identical edge-case behavior across all
//! recommenders.

use crate::artifact::index::IdIndex;
use crate::recommend::types::Recommendation;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Ranks `(index, score)` pairs and materializes them as product rows.
///
/// Sort order is descending by score with ascending-index tie-break, so
/// equal-score results are reproducible across calls and platforms.
/// `self_index` (the query product's own row) is excluded; indices the
/// mapping cannot resolve are skipped. At most `n` rows are returned.
pub fn materialize_ranked(
    mut scored: Vec<(u32, f32)>,
    self_index: Option<u32>,
    index: &IdIndex<String>,
    n: usize,
) -> Vec<Recommendation> {
    if n == 0 || scored.is_empty() {
        return Vec::new();
    }

    scored.sort_unstable_by_key(|&(idx, score)| (Reverse(OrderedFloat(score)), idx));

    let mut rows = Vec::with_capacity(n.min(scored.len()));
    for (idx, score) in scored {
        if Some(idx) == self_index {
            continue;
        }
        let Some(product) = index.id_of(idx) else {
            continue;
        };
        rows.push(Recommendation {
            product: product.clone(),
            score,
        });
        if rows.len() == n {
            break;
        }
    }
    rows
}
