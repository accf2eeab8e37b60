//! Query front for the recommendation engine.
//!
//! Wires the similarity store, the location index and the metadata table
//! behind the two query operations plus the listing helpers a selection
//! UI needs.

use crate::config::EngineConfig;
use crate::errors::{DataIntegrityError, QueryError};
use crate::location::{within_radius, LocationIndex, NearbyProperty};
use crate::metadata::MetadataTable;
use crate::similarity::{combined_row, rank_descending, Recommendation, SimilarityStore};

/// Immutable query engine over the loaded similarity and location data.
///
/// All inputs are validated at construction and never mutated afterwards,
/// so a shared reference can serve concurrent callers without locking. To
/// refresh the underlying data, build a new engine and swap the handle.
pub struct Engine {
    store: SimilarityStore,
    locations: LocationIndex,
    metadata: MetadataTable,
    config: EngineConfig,
}

impl Engine {
    /// Assemble an engine.
    ///
    /// The location table's row set and the metadata table's key set must
    /// each equal the similarity index's property set; a mismatch makes
    /// lookups undefined and is fatal here.
    pub fn new(
        store: SimilarityStore,
        locations: LocationIndex,
        metadata: MetadataTable,
        config: EngineConfig,
    ) -> Result<Self, DataIntegrityError> {
        check_key_sets(&store, &locations, &metadata)?;

        log::info!(
            "engine ready: {} properties, {} landmarks",
            store.row_count(),
            locations.landmarks().len()
        );

        Ok(Self {
            store,
            locations,
            metadata,
            config,
        })
    }

    /// Top-N properties most similar to `source_id`, best first.
    ///
    /// `top_n` falls back to the configured default when `None`. The
    /// source property is never part of the result, scores are not
    /// re-normalized after dropping it, and when fewer than `top_n` other
    /// properties exist all of them are returned.
    pub fn recommend(
        &self,
        source_id: &str,
        top_n: Option<usize>,
    ) -> Result<Vec<Recommendation>, QueryError> {
        let top_n = top_n.unwrap_or(self.config.default_top_n);
        if top_n == 0 {
            return Err(QueryError::ZeroTopN);
        }

        let source = self.store.index_of(source_id)?;
        let combined = combined_row(self.store.signal_rows(source), &self.config.weights);

        let ids = self.store.property_ids();
        Ok(rank_descending(&combined, source, top_n)
            .into_iter()
            .map(|(position, score)| {
                let property_id = ids[position].clone();
                let link = self.metadata.link(&property_id).map(str::to_string);
                Recommendation {
                    property_id,
                    score: round_score(score),
                    link,
                }
            })
            .collect())
    }

    /// Properties strictly within `radius_km` of `landmark`, closest
    /// first. An empty result means no property is that close.
    pub fn search_by_radius(
        &self,
        landmark: &str,
        radius_km: f64,
    ) -> Result<Vec<NearbyProperty>, QueryError> {
        within_radius(&self.locations, landmark, radius_km)
    }

    /// All property ids, sorted for selection UIs.
    pub fn properties(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self
            .store
            .property_ids()
            .iter()
            .map(String::as_str)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// All landmark names, sorted for selection UIs.
    pub fn landmarks(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .locations
            .landmarks()
            .iter()
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    pub fn row_count(&self) -> usize {
        self.store.row_count()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

/// Round a combined score to 3 decimals for presentation.
fn round_score(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn check_key_sets(
    store: &SimilarityStore,
    locations: &LocationIndex,
    metadata: &MetadataTable,
) -> Result<(), DataIntegrityError> {
    if locations.len() != store.row_count() {
        return Err(DataIntegrityError::KeyCountMismatch {
            table: "location",
            expected: store.row_count(),
            got: locations.len(),
        });
    }

    if metadata.len() != store.row_count() {
        return Err(DataIntegrityError::KeyCountMismatch {
            table: "metadata",
            expected: store.row_count(),
            got: metadata.len(),
        });
    }

    // Equal counts plus full coverage of the index set means the sets are
    // identical; duplicates cannot exist on either side.
    for id in store.property_ids() {
        if !locations.contains(id) {
            return Err(DataIntegrityError::MissingProperty {
                table: "location",
                property: id.clone(),
            });
        }
        if !metadata.contains(id) {
            return Err(DataIntegrityError::MissingProperty {
                table: "metadata",
                property: id.clone(),
            });
        }
    }

    Ok(())
}
