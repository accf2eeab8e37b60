//! Descending ranking with self-exclusion.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One recommended property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub property_id: String,
    /// Combined similarity score, rounded to 3 decimals.
    pub score: f64,
    /// Listing URL, when the metadata table has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Rank score positions descending, excluding the source row.
///
/// The source is dropped by position, not by rank: its self-similarity
/// score would otherwise sit at rank 1. The sort is stable, so equal
/// scores keep their matrix row order and the output is deterministic
/// across runs. Returns at most `top_n` `(position, score)` pairs, fewer
/// when fewer candidates exist.
pub fn rank_descending(scores: &[f64], exclude: usize, top_n: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|&(position, _)| position != exclude)
        .collect();

    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.truncate(top_n);
    ranked
}
