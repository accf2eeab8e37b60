//! The three signal matrices and the shared property ordering.

use std::collections::HashMap;

use crate::errors::{DataIntegrityError, QueryError};
use crate::similarity::{SimilarityMatrix, SIGNAL_COUNT};

/// Owns the precomputed similarity matrices over one ordered property
/// set. A position handed out by [`SimilarityStore::index_of`] is valid
/// for every signal, which is what makes the per-row combination sound.
pub struct SimilarityStore {
    signals: [SimilarityMatrix; SIGNAL_COUNT],
    positions: HashMap<String, usize>,
}

impl SimilarityStore {
    /// Validates that all three matrices agree in dimension and in label
    /// sequence before any of them can be queried.
    pub fn new(signals: [SimilarityMatrix; SIGNAL_COUNT]) -> Result<Self, DataIntegrityError> {
        let first = &signals[0];
        for other in &signals[1..] {
            if other.len() != first.len() {
                return Err(DataIntegrityError::DimensionMismatch {
                    expected: first.len(),
                    got: other.len(),
                });
            }

            for (position, (expected, got)) in
                first.labels().iter().zip(other.labels()).enumerate()
            {
                if expected != got {
                    return Err(DataIntegrityError::LabelMismatch {
                        position,
                        expected: expected.clone(),
                        got: got.clone(),
                    });
                }
            }
        }

        let positions = first
            .labels()
            .iter()
            .enumerate()
            .map(|(position, label)| (label.clone(), position))
            .collect();

        Ok(Self { signals, positions })
    }

    /// Position of a property in the shared ordering.
    pub fn index_of(&self, id: &str) -> Result<usize, QueryError> {
        self.positions
            .get(id)
            .copied()
            .ok_or_else(|| QueryError::UnknownProperty(id.to_string()))
    }

    /// Number of properties in the shared ordering.
    pub fn row_count(&self) -> usize {
        self.signals[0].len()
    }

    /// Property ids in matrix row order.
    pub fn property_ids(&self) -> &[String] {
        self.signals[0].labels()
    }

    /// The three signal rows for one position, in signal order.
    pub fn signal_rows(&self, position: usize) -> [&[f64]; SIGNAL_COUNT] {
        [
            self.signals[0].row(position),
            self.signals[1].row(position),
            self.signals[2].row(position),
        ]
    }
}
