//! Dense and sparse matrix storage for similarity artifacts.
//!
//! [`DenseMatrix`] is a row-major f32 arena used for pairwise similarity
//! scores. [`CsrMatrix`] is a compressed-sparse-row structure used for
//! co-occurrence counts and user-item purchase flags, where most entries are
//! zero. Both are plain data: scoring logic lives in `crate::recommend`.

use serde::{Deserialize, Serialize};

/// A dense row-major matrix of f32 values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DenseMatrix {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
    /// Row-major values, `rows * cols` long.
    pub data: Vec<f32>,
}

impl DenseMatrix {
    /// Creates a matrix from row-major data, checking the length up front.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self, String> {
        if data.len() != rows * cols {
            return Err(format!(
                "data length {} != rows({rows}) * cols({cols})",
                data.len()
            ));
        }
        Ok(Self { rows, cols, data })
    }

    /// Returns row `i` as a slice, or `None` if `i` is out of range.
    pub fn row(&self, i: usize) -> Option<&[f32]> {
        if i >= self.rows {
            return None;
        }
        let start = i * self.cols;
        Some(&self.data[start..start + self.cols])
    }

    /// True when the matrix has as many rows as columns.
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Structural consistency check, run after deserialization.
    pub fn validate(&self) -> Result<(), String> {
        if self.data.len() != self.rows * self.cols {
            return Err(format!(
                "data length {} != rows({}) * cols({})",
                self.data.len(),
                self.rows,
                self.cols
            ));
        }
        if let Some(v) = self.data.iter().find(|v| !v.is_finite()) {
            return Err(format!("non-finite value {v} in dense matrix"));
        }
        Ok(())
    }
}

/// A compressed-sparse-row matrix of strictly positive f32 values.
///
/// Row `i` spans `col_indices[row_offsets[i]..row_offsets[i + 1]]` and the
/// parallel slice of `values`. Zero entries are never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsrMatrix {
    /// Number of columns.
    pub cols: usize,
    /// Per-row start offsets into `col_indices`/`values`; `rows + 1` long.
    pub row_offsets: Vec<usize>,
    /// Column index of each stored entry.
    pub col_indices: Vec<u32>,
    /// Value of each stored entry, parallel to `col_indices`.
    pub values: Vec<f32>,
}

impl CsrMatrix {
    /// Creates an empty matrix with the given shape.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            cols,
            row_offsets: vec![0; rows + 1],
            col_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Builds a matrix from per-row `(column, value)` entries.
    ///
    /// Entries with value <= 0 are dropped, matching the invariant that
    /// sparse rows only carry positive data.
    pub fn from_rows(cols: usize, rows: &[Vec<(u32, f32)>]) -> Self {
        let mut matrix = Self {
            cols,
            row_offsets: Vec::with_capacity(rows.len() + 1),
            col_indices: Vec::new(),
            values: Vec::new(),
        };
        matrix.row_offsets.push(0);
        for row in rows {
            for &(col, value) in row {
                if value > 0.0 {
                    matrix.col_indices.push(col);
                    matrix.values.push(value);
                }
            }
            matrix.row_offsets.push(matrix.col_indices.len());
        }
        matrix
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.row_offsets.len().saturating_sub(1)
    }

    /// Number of stored (nonzero) entries.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns row `i` as parallel `(column indices, values)` slices, or
    /// `None` if `i` is out of range.
    pub fn row(&self, i: usize) -> Option<(&[u32], &[f32])> {
        if i >= self.rows() {
            return None;
        }
        let start = self.row_offsets[i];
        let end = self.row_offsets[i + 1];
        Some((&self.col_indices[start..end], &self.values[start..end]))
    }

    /// Structural consistency check, run after deserialization.
    pub fn validate(&self) -> Result<(), String> {
        if self.row_offsets.is_empty() {
            return Err("row_offsets must hold at least one entry".to_string());
        }
        if self.row_offsets[0] != 0 {
            return Err(format!("row_offsets[0] is {}, expected 0", self.row_offsets[0]));
        }
        if self.row_offsets.windows(2).any(|w| w[0] > w[1]) {
            return Err("row_offsets must be non-decreasing".to_string());
        }
        let nnz = self.row_offsets[self.row_offsets.len() - 1];
        if nnz != self.col_indices.len() || nnz != self.values.len() {
            return Err(format!(
                "final offset {nnz} != col_indices({}) / values({})",
                self.col_indices.len(),
                self.values.len()
            ));
        }
        if let Some(&col) = self.col_indices.iter().find(|&&c| c as usize >= self.cols) {
            return Err(format!("column index {col} out of bounds (cols={})", self.cols));
        }
        if let Some(v) = self.values.iter().find(|v| !(**v > 0.0) || !v.is_finite()) {
            return Err(format!("stored value {v} is not strictly positive and finite"));
        }
        Ok(())
    }
}
