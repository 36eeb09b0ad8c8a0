//! Co-occurrence artifact: sparse paired-event counts between products.
//!
//! The same structure backs two independent strategies — co-purchase and
//! co-quotation — over disjoint artifacts. [`CoOccurrenceKind`] labels which
//! one a given instance serves.

use crate::artifact::index::IdIndex;
use crate::artifact::matrix::CsrMatrix;
use serde::{Deserialize, Serialize};

/// Which paired event a co-occurrence artifact counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoOccurrenceKind {
    /// Products bought together in one transaction.
    Purchase,
    /// Products quoted together in one quotation.
    Quotation,
}

impl CoOccurrenceKind {
    /// Stable lowercase label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            CoOccurrenceKind::Purchase => "co_purchase",
            CoOccurrenceKind::Quotation => "co_quotation",
        }
    }
}

/// Precomputed co-occurrence artifact.
///
/// `counts` is a sparse square matrix of nonnegative pair counts; stored
/// entries are strictly positive (zeros are omitted).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoOccurrenceArtifact {
    /// Sparse square co-occurrence count matrix.
    pub counts: CsrMatrix,
    /// Product ↔ row index mapping.
    pub products: IdIndex<String>,
}

impl CoOccurrenceArtifact {
    /// Validate internal invariants after deserialization.
    pub fn validate(&self) -> Result<(), String> {
        self.counts.validate()?;
        self.products.validate()?;
        if self.counts.rows() != self.counts.cols {
            return Err(format!(
                "count matrix is {}x{}, expected square",
                self.counts.rows(),
                self.counts.cols
            ));
        }
        if self.counts.rows() != self.products.len() {
            return Err(format!(
                "count matrix side {} != product mapping size {}",
                self.counts.rows(),
                self.products.len()
            ));
        }
        Ok(())
    }
}
