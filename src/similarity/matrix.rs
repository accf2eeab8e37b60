//! One labelled square similarity matrix.

use std::collections::HashSet;

use crate::errors::DataIntegrityError;

/// A square matrix of pairwise similarity scores with one property label
/// per row/column position. Storage is row-major; the diagonal holds the
/// self-similarity maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl SimilarityMatrix {
    /// Build a matrix from labels and row vectors.
    ///
    /// Validates that the row count matches the label count, that every
    /// row has full width, and that no label repeats.
    pub fn from_rows(
        labels: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self, DataIntegrityError> {
        let n = labels.len();
        if rows.len() != n {
            return Err(DataIntegrityError::LabelCountMismatch {
                labels: n,
                rows: rows.len(),
            });
        }

        for (index, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(DataIntegrityError::RaggedRow {
                    index,
                    len: row.len(),
                    expected: n,
                });
            }
        }

        let mut seen = HashSet::with_capacity(n);
        for label in &labels {
            if !seen.insert(label.as_str()) {
                return Err(DataIntegrityError::DuplicateProperty(label.clone()));
            }
        }

        let mut values = Vec::with_capacity(n * n);
        for row in rows {
            values.extend(row);
        }

        Ok(Self { labels, values })
    }

    /// Number of rows (and columns).
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Property labels in row order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// One full row of scores by position. Positions come from the
    /// store's shared ordering and are always in range.
    pub fn row(&self, position: usize) -> &[f64] {
        let n = self.labels.len();
        &self.values[position * n..(position + 1) * n]
    }
}
