//! Landmark distance table and radius search.
//!
//! Distances are stored in meters per property and landmark. A radius
//! query takes kilometers and converts the threshold to meters once, so
//! stored values are never converted during the scan.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::{DataIntegrityError, QueryError};

/// Per-property distances to a fixed set of named landmarks.
pub struct LocationIndex {
    landmarks: Vec<String>,
    columns: HashMap<String, usize>,
    property_ids: Vec<String>,
    positions: HashMap<String, usize>,
    /// One row per property, one cell per landmark, meters. `None` marks
    /// an unrecorded distance.
    distances: Vec<Vec<Option<f64>>>,
}

impl LocationIndex {
    /// Build the index from landmark names and per-property rows.
    ///
    /// NaN distances normalize to missing. Ragged rows, duplicate ids,
    /// duplicate landmarks and negative distances are integrity
    /// violations.
    pub fn new(
        landmarks: Vec<String>,
        rows: Vec<(String, Vec<Option<f64>>)>,
    ) -> Result<Self, DataIntegrityError> {
        let mut columns = HashMap::with_capacity(landmarks.len());
        for (position, landmark) in landmarks.iter().enumerate() {
            if columns.insert(landmark.clone(), position).is_some() {
                return Err(DataIntegrityError::DuplicateLandmark(landmark.clone()));
            }
        }

        let mut property_ids = Vec::with_capacity(rows.len());
        let mut positions = HashMap::with_capacity(rows.len());
        let mut distances = Vec::with_capacity(rows.len());

        for (index, (property_id, row)) in rows.into_iter().enumerate() {
            if row.len() != landmarks.len() {
                return Err(DataIntegrityError::RaggedRow {
                    index,
                    len: row.len(),
                    expected: landmarks.len(),
                });
            }

            if positions.insert(property_id.clone(), index).is_some() {
                return Err(DataIntegrityError::DuplicateProperty(property_id));
            }

            let mut cells = Vec::with_capacity(row.len());
            for value in row {
                match value {
                    Some(metres) if metres.is_nan() => cells.push(None),
                    Some(metres) if metres < 0.0 => {
                        return Err(DataIntegrityError::NegativeDistance {
                            property: property_id,
                            value: metres,
                        });
                    }
                    other => cells.push(other),
                }
            }

            property_ids.push(property_id);
            distances.push(cells);
        }

        Ok(Self {
            landmarks,
            columns,
            property_ids,
            positions,
            distances,
        })
    }

    /// Landmark names in column order.
    pub fn landmarks(&self) -> &[String] {
        &self.landmarks
    }

    /// Property ids in row order.
    pub fn property_ids(&self) -> &[String] {
        &self.property_ids
    }

    pub fn contains(&self, property_id: &str) -> bool {
        self.positions.contains_key(property_id)
    }

    /// Number of properties in the table.
    pub fn len(&self) -> usize {
        self.property_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.property_ids.is_empty()
    }

    /// Recorded and missing distances to one landmark, in row order.
    pub fn distances_for(
        &self,
        landmark: &str,
    ) -> Result<Vec<(&str, Option<f64>)>, QueryError> {
        let column = *self
            .columns
            .get(landmark)
            .ok_or_else(|| QueryError::UnknownLandmark(landmark.to_string()))?;

        Ok(self
            .property_ids
            .iter()
            .zip(self.distances.iter())
            .map(|(id, row)| (id.as_str(), row[column]))
            .collect())
    }
}

/// One radius-search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyProperty {
    pub property_id: String,
    /// Distance to the queried landmark, rounded to 2 decimals.
    pub distance_km: f64,
}

/// Properties strictly closer to `landmark` than `radius_km`.
///
/// Properties with no recorded distance are skipped. Results are sorted
/// ascending by distance, ties broken by property id so the ordering is
/// deterministic. An empty result means no property is that close; it is
/// not an error.
pub fn within_radius(
    index: &LocationIndex,
    landmark: &str,
    radius_km: f64,
) -> Result<Vec<NearbyProperty>, QueryError> {
    if radius_km < 0.0 {
        return Err(QueryError::NegativeRadius(radius_km));
    }

    let threshold_metres = radius_km * 1000.0;
    let mut hits: Vec<(&str, f64)> = index
        .distances_for(landmark)?
        .into_iter()
        .filter_map(|(id, distance)| {
            distance
                .filter(|metres| *metres < threshold_metres)
                .map(|metres| (id, metres))
        })
        .collect();

    hits.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    Ok(hits
        .into_iter()
        .map(|(property_id, metres)| NearbyProperty {
            property_id: property_id.to_string(),
            distance_km: round_km(metres / 1000.0),
        })
        .collect())
}

/// Round to 2 decimals for presentation.
fn round_km(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metro_index() -> LocationIndex {
        LocationIndex::new(
            vec!["Metro".to_string(), "Airport".to_string()],
            vec![
                ("P1".to_string(), vec![Some(800.0), Some(12_000.0)]),
                ("P2".to_string(), vec![Some(1500.0), Some(9_500.0)]),
                ("P3".to_string(), vec![Some(f64::NAN), Some(4_000.0)]),
                ("P4".to_string(), vec![Some(2000.0), None]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_within_radius_filters_sorts_and_rounds() {
        let hits = within_radius(&metro_index(), "Metro", 1.6).unwrap();

        assert_eq!(
            hits,
            vec![
                NearbyProperty {
                    property_id: "P1".to_string(),
                    distance_km: 0.8,
                },
                NearbyProperty {
                    property_id: "P2".to_string(),
                    distance_km: 1.5,
                },
            ]
        );
    }

    #[test]
    fn test_threshold_is_strict() {
        // 2000 m is not strictly inside a 2 km radius.
        let hits = within_radius(&metro_index(), "Metro", 2.0).unwrap();
        let ids: Vec<&str> = hits.iter().map(|hit| hit.property_id.as_str()).collect();
        assert_eq!(ids, vec!["P1", "P2"]);
    }

    #[test]
    fn test_zero_radius_is_empty() {
        let hits = within_radius(&metro_index(), "Metro", 0.0).unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let err = within_radius(&metro_index(), "Metro", -0.5).unwrap_err();
        assert_eq!(err, QueryError::NegativeRadius(-0.5));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_unknown_landmark() {
        let err = within_radius(&metro_index(), "Harbor", 5.0).unwrap_err();
        assert_eq!(err, QueryError::UnknownLandmark("Harbor".to_string()));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_missing_distances_are_skipped() {
        // P3's Metro distance is NaN in the input, P4 has no Airport cell.
        let hits = within_radius(&metro_index(), "Metro", 100.0).unwrap();
        assert!(hits.iter().all(|hit| hit.property_id != "P3"));

        let hits = within_radius(&metro_index(), "Airport", 100.0).unwrap();
        assert!(hits.iter().all(|hit| hit.property_id != "P4"));
    }

    #[test]
    fn test_distance_ties_break_by_property_id() {
        let index = LocationIndex::new(
            vec!["Metro".to_string()],
            vec![
                ("B".to_string(), vec![Some(700.0)]),
                ("A".to_string(), vec![Some(700.0)]),
            ],
        )
        .unwrap();

        let hits = within_radius(&index, "Metro", 1.0).unwrap();
        let ids: Vec<&str> = hits.iter().map(|hit| hit.property_id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn test_negative_distance_rejected_at_construction() {
        let result = LocationIndex::new(
            vec!["Metro".to_string()],
            vec![("P1".to_string(), vec![Some(-10.0)])],
        );
        assert!(matches!(
            result,
            Err(DataIntegrityError::NegativeDistance { .. })
        ));
    }

    #[test]
    fn test_ragged_row_rejected() {
        let result = LocationIndex::new(
            vec!["Metro".to_string(), "Airport".to_string()],
            vec![("P1".to_string(), vec![Some(100.0)])],
        );
        assert!(matches!(result, Err(DataIntegrityError::RaggedRow { .. })));
    }

    #[test]
    fn test_duplicate_property_rejected() {
        let result = LocationIndex::new(
            vec!["Metro".to_string()],
            vec![
                ("P1".to_string(), vec![Some(100.0)]),
                ("P1".to_string(), vec![Some(200.0)]),
            ],
        );
        assert!(matches!(
            result,
            Err(DataIntegrityError::DuplicateProperty(id)) if id == "P1"
        ));
    }

    #[test]
    fn test_distances_for_row_order() {
        let index = metro_index();
        let distances = index.distances_for("Metro").unwrap();

        assert_eq!(distances.len(), 4);
        assert_eq!(distances[0], ("P1", Some(800.0)));
        assert_eq!(distances[2].1, None); // NaN normalized on construction
    }
}
