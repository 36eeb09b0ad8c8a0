//! Artifact snapshot loading.
//!
//! Artifacts are produced by an external training pipeline and shipped as
//! bincode snapshot files with a CRC32 integrity footer:
//! `[bincode payload][magic "RST1"][u32 CRC32 BE]`. Loading verifies the
//! checksum, deserializes, and runs the artifact's structural `validate()`.
//! Each artifact loads independently so one corrupt file cannot take down
//! the other strategies.

use crate::artifact::content::ContentArtifact;
use crate::artifact::cooccurrence::CoOccurrenceArtifact;
use crate::artifact::historical::HistoricalArtifact;
use crate::recommend::context::RecommenderContext;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// Magic bytes preceding the CRC32 footer.
const SNAPSHOT_CRC_MAGIC: &[u8; 4] = b"RST1";

/// Snapshot file name for the content artifact.
pub const CONTENT_SNAPSHOT: &str = "content.rec";
/// Snapshot file name for the co-purchase artifact.
pub const CO_PURCHASE_SNAPSHOT: &str = "co_purchase.rec";
/// Snapshot file name for the co-quotation artifact.
pub const CO_QUOTATION_SNAPSHOT: &str = "co_quotation.rec";
/// Snapshot file name for the historical artifact.
pub const HISTORICAL_SNAPSHOT: &str = "historical.rec";

/// Write a snapshot file: bincode payload plus CRC32 footer, atomic
/// temp-file + rename.
///
/// The serving layer never calls this; it exists for the training-side
/// tooling and tests that need to produce loadable snapshots.
pub fn write_snapshot<T: Serialize>(value: &T, path: &Path) -> io::Result<()> {
    let bytes = bincode::serialize(value).map_err(|e| io::Error::other(e.to_string()))?;
    let crc = crc32fast::hash(&bytes);

    let mut output = Vec::with_capacity(bytes.len() + 8);
    output.extend_from_slice(&bytes);
    output.extend_from_slice(SNAPSHOT_CRC_MAGIC);
    output.extend_from_slice(&crc.to_be_bytes());

    let tmp_path = path.with_extension("rec.tmp");
    fs::write(&tmp_path, &output)?;
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Read a snapshot file, verify the CRC32 footer, and deserialize.
fn load_snapshot<T: DeserializeOwned>(path: &Path) -> io::Result<T> {
    let raw = fs::read(path)?;

    if raw.len() < 8 || &raw[raw.len() - 8..raw.len() - 4] != SNAPSHOT_CRC_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("snapshot {path:?} has no CRC32 footer"),
        ));
    }
    let payload = &raw[..raw.len() - 8];
    let stored_crc = u32::from_be_bytes([
        raw[raw.len() - 4],
        raw[raw.len() - 3],
        raw[raw.len() - 2],
        raw[raw.len() - 1],
    ]);
    let computed_crc = crc32fast::hash(payload);
    if computed_crc != stored_crc {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "snapshot CRC32 mismatch: expected {stored_crc:#010x}, got {computed_crc:#010x}. \
                 File may be corrupted: {path:?}"
            ),
        ));
    }

    bincode::deserialize(payload).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("snapshot deserialization failed for {path:?}: {e}"),
        )
    })
}

/// Load and validate the content artifact.
pub fn load_content(path: &Path) -> io::Result<ContentArtifact> {
    let artifact: ContentArtifact = load_snapshot(path)?;
    artifact
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(artifact)
}

/// Load and validate a co-occurrence artifact.
pub fn load_co_occurrence(path: &Path) -> io::Result<CoOccurrenceArtifact> {
    let artifact: CoOccurrenceArtifact = load_snapshot(path)?;
    artifact
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(artifact)
}

/// Load and validate the historical artifact.
pub fn load_historical(path: &Path) -> io::Result<HistoricalArtifact> {
    let artifact: HistoricalArtifact = load_snapshot(path)?;
    artifact
        .validate()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(artifact)
}

/// Load every artifact found under `dir` into a context.
///
/// Each artifact loads independently: a missing or corrupt snapshot logs a
/// warning and leaves that strategy unavailable, while the rest proceed.
pub fn load_context(dir: &Path) -> RecommenderContext {
    let content = match load_content(&dir.join(CONTENT_SNAPSHOT)) {
        Ok(artifact) => {
            tracing::info!(products = artifact.products.len(), "loaded content artifact");
            Some(artifact)
        }
        Err(e) => {
            tracing::warn!("could not load content artifact: {e}");
            None
        }
    };

    let co_purchase = match load_co_occurrence(&dir.join(CO_PURCHASE_SNAPSHOT)) {
        Ok(artifact) => {
            tracing::info!(
                products = artifact.products.len(),
                pairs = artifact.counts.nnz(),
                "loaded co-purchase artifact"
            );
            Some(artifact)
        }
        Err(e) => {
            tracing::warn!("could not load co-purchase artifact: {e}");
            None
        }
    };

    let co_quotation = match load_co_occurrence(&dir.join(CO_QUOTATION_SNAPSHOT)) {
        Ok(artifact) => {
            tracing::info!(
                products = artifact.products.len(),
                pairs = artifact.counts.nnz(),
                "loaded co-quotation artifact"
            );
            Some(artifact)
        }
        Err(e) => {
            tracing::warn!("could not load co-quotation artifact: {e}");
            None
        }
    };

    let historical = match load_historical(&dir.join(HISTORICAL_SNAPSHOT)) {
        Ok(artifact) => {
            tracing::info!(
                customers = artifact.customers.len(),
                items = artifact.items.len(),
                ready = artifact.ready,
                "loaded historical artifact"
            );
            Some(artifact)
        }
        Err(e) => {
            tracing::warn!("could not load historical artifact: {e}");
            None
        }
    };

    RecommenderContext {
        content,
        co_purchase,
        co_quotation,
        historical,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::index::IdIndex;
    use crate::artifact::matrix::{CsrMatrix, DenseMatrix};
    use tempfile::TempDir;

    fn content_artifact() -> ContentArtifact {
        ContentArtifact {
            similarity: DenseMatrix::from_vec(2, 2, vec![1.0, 0.4, 0.4, 1.0]).unwrap(),
            products: IdIndex::from_pairs([("a".to_string(), 0), ("b".to_string(), 1)]),
        }
    }

    fn co_occurrence_artifact() -> CoOccurrenceArtifact {
        CoOccurrenceArtifact {
            counts: CsrMatrix::from_rows(2, &[vec![(1, 2.0)], vec![(0, 2.0)]]),
            products: IdIndex::from_pairs([("a".to_string(), 0), ("b".to_string(), 1)]),
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONTENT_SNAPSHOT);
        write_snapshot(&content_artifact(), &path).unwrap();
        let loaded = load_content(&path).unwrap();
        assert_eq!(loaded.products.index_of("b"), Some(1));
        assert_eq!(loaded.similarity.row(0), content_artifact().similarity.row(0));
    }

    #[test]
    fn test_corrupted_payload_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONTENT_SNAPSHOT);
        write_snapshot(&content_artifact(), &path).unwrap();

        let mut raw = fs::read(&path).unwrap();
        raw[0] ^= 0xff;
        fs::write(&path, &raw).unwrap();

        let err = load_content(&path).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_missing_footer_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONTENT_SNAPSHOT);
        fs::write(&path, b"junk").unwrap();
        assert!(load_content(&path).is_err());
    }

    #[test]
    fn test_invalid_artifact_rejected_after_deserialize() {
        // Structurally decodable but fails validate(): non-square matrix.
        let bad = ContentArtifact {
            similarity: DenseMatrix::from_vec(1, 2, vec![1.0, 0.4]).unwrap(),
            products: IdIndex::from_pairs([("a".to_string(), 0)]),
        };
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONTENT_SNAPSHOT);
        write_snapshot(&bad, &path).unwrap();
        assert!(load_content(&path).is_err());
    }

    #[test]
    fn test_load_context_isolates_failures() {
        let dir = TempDir::new().unwrap();
        write_snapshot(&content_artifact(), &dir.path().join(CONTENT_SNAPSHOT)).unwrap();
        write_snapshot(
            &co_occurrence_artifact(),
            &dir.path().join(CO_PURCHASE_SNAPSHOT),
        )
        .unwrap();
        // Corrupt co-quotation snapshot; no historical snapshot at all.
        fs::write(dir.path().join(CO_QUOTATION_SNAPSHOT), b"garbage").unwrap();

        let ctx = load_context(dir.path());
        assert!(ctx.content.is_some());
        assert!(ctx.co_purchase.is_some());
        assert!(ctx.co_quotation.is_none());
        assert!(ctx.historical.is_none());
        assert!(ctx.any_loaded());
    }
}
