//! Precomputed similarity artifacts and their loading.
//!
//! Artifacts are immutable structures produced by an external training
//! pipeline: a matrix plus identifier ↔ index mappings per strategy. This
//! module owns their types, structural validation, and snapshot loading;
//! scoring logic lives in [`crate::recommend`].

/// Content-similarity artifact (dense pairwise scores).
pub mod content;
/// Co-occurrence artifacts (sparse pair counts; purchase and quotation).
pub mod cooccurrence;
/// Historical artifact (user-item purchases + item-item similarity).
pub mod historical;
/// Identifier ↔ dense index mappings.
pub mod index;
/// Snapshot loading with CRC32 integrity checks.
pub mod loader;
/// Dense and sparse matrix storage.
pub mod matrix;

pub use content::ContentArtifact;
pub use cooccurrence::{CoOccurrenceArtifact, CoOccurrenceKind};
pub use historical::HistoricalArtifact;
pub use index::IdIndex;
pub use matrix::{CsrMatrix, DenseMatrix};
