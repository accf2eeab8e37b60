//! Fixed-weight merging of the per-signal similarity rows.
//!
//! The combined score for a property pair is the weighted sum of its
//! three signal scores. The weights are a ranking policy held in
//! configuration, not logic baked into the top-N machinery: swapping
//! them reorders results without touching the ranking code.

use serde::{Deserialize, Serialize};

use crate::similarity::{DEFAULT_WEIGHTS, SIGNAL_COUNT};

/// Per-signal weights applied by [`combined_row`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimilarityWeights(pub [f64; SIGNAL_COUNT]);

impl Default for SimilarityWeights {
    fn default() -> Self {
        Self(DEFAULT_WEIGHTS)
    }
}

impl SimilarityWeights {
    /// True when every weight is a finite number.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|weight| weight.is_finite())
    }
}

/// Combine the three signal rows of one source property into a single
/// score row: `combined[i] = Σ weights[s] * rows[s][i]`.
///
/// Pure function of its inputs. Only the queried property's row is ever
/// combined; the full combined matrix is never materialized. Rows must
/// have equal length, which the store guarantees for rows obtained from
/// `SimilarityStore::signal_rows`.
pub fn combined_row(rows: [&[f64]; SIGNAL_COUNT], weights: &SimilarityWeights) -> Vec<f64> {
    let mut combined = vec![0.0; rows[0].len()];
    for (row, &weight) in rows.iter().zip(weights.0.iter()) {
        for (acc, &score) in combined.iter_mut().zip(row.iter()) {
            *acc += weight * score;
        }
    }
    combined
}
