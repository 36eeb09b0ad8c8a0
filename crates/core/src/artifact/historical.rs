//! Historical artifact: user purchase history plus item-item similarity.
//!
//! Backs the item-based collaborative filter. The user-item matrix records
//! which products each customer has bought (1 = purchased, zeros omitted);
//! the dense item-similarity matrix scores every item pair.

use crate::artifact::index::IdIndex;
use crate::artifact::matrix::{CsrMatrix, DenseMatrix};
use serde::{Deserialize, Serialize};

/// Precomputed historical (collaborative filtering) artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalArtifact {
    /// Sparse user × item purchase matrix.
    pub user_item: CsrMatrix,
    /// Dense item × item similarity matrix.
    pub item_similarity: DenseMatrix,
    /// Customer ↔ user-row index mapping.
    pub customers: IdIndex<i64>,
    /// Item index ↔ product identifier mapping.
    pub items: IdIndex<String>,
    /// Set by the training pipeline once the artifact is complete. Scoring
    /// refuses to run while false.
    pub ready: bool,
}

impl HistoricalArtifact {
    /// Validate internal invariants after deserialization.
    ///
    /// The two matrices must agree on the item count and the user-item rows
    /// must match the customer mapping. Scoring additionally tolerates
    /// per-entry index mismatches defensively.
    pub fn validate(&self) -> Result<(), String> {
        self.user_item.validate()?;
        self.item_similarity.validate()?;
        self.customers.validate()?;
        self.items.validate()?;
        if !self.item_similarity.is_square() {
            return Err(format!(
                "item similarity matrix is {}x{}, expected square",
                self.item_similarity.rows, self.item_similarity.cols
            ));
        }
        if self.user_item.cols != self.item_similarity.rows {
            return Err(format!(
                "user-item has {} item columns but item similarity has {} rows",
                self.user_item.cols, self.item_similarity.rows
            ));
        }
        if self.user_item.rows() != self.customers.len() {
            return Err(format!(
                "user-item has {} rows but customer mapping has {} entries",
                self.user_item.rows(),
                self.customers.len()
            ));
        }
        Ok(())
    }
}
