//! File loading for the engine's precomputed inputs.
//!
//! Similarity matrices are JSON documents of the form
//! `{"labels": [...], "rows": [[...]]}`. The location and metadata tables
//! are CSV. Loading happens once, before queries start; nothing here is
//! on the query path.

use std::path::Path;
use std::time::Instant;

use serde::Deserialize;

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::errors::DataIntegrityError;
use crate::location::LocationIndex;
use crate::metadata::{MetadataTable, PropertyRecord};
use crate::similarity::{SimilarityMatrix, SimilarityStore, SIGNAL_COUNT};

/// Similarity matrix files expected inside the data directory handed to
/// [`load_engine`], in signal order.
pub const SIMILARITY_FILES: [&str; SIGNAL_COUNT] = [
    "similarity_1.json",
    "similarity_2.json",
    "similarity_3.json",
];

/// Landmark distance table inside the data directory.
pub const LOCATIONS_FILE: &str = "locations.csv";

/// Property metadata table inside the data directory.
pub const PROPERTIES_FILE: &str = "properties.csv";

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("io error: {0:?}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0:?}")]
    Json(#[from] serde_json::Error),

    #[error("yaml error: {0:?}")]
    Yaml(#[from] serde_yml::Error),

    #[error("csv error: {0:?}")]
    Csv(#[from] csv::Error),

    #[error("{file}: missing column {column:?}")]
    MissingColumn { file: String, column: String },

    #[error("{file}: bad distance {value:?} for property {property:?}")]
    BadDistance {
        file: String,
        property: String,
        value: String,
    },

    #[error(transparent)]
    Integrity(#[from] DataIntegrityError),
}

/// On-disk form of one similarity matrix.
#[derive(Deserialize)]
struct MatrixFile {
    labels: Vec<String>,
    rows: Vec<Vec<f64>>,
}

/// Load one similarity matrix from its JSON file.
pub fn load_matrix(path: &Path) -> Result<SimilarityMatrix, LoadError> {
    let raw = std::fs::read_to_string(path)?;
    let file: MatrixFile = serde_json::from_str(&raw)?;
    Ok(SimilarityMatrix::from_rows(file.labels, file.rows)?)
}

/// Load the landmark distance table.
///
/// The first column holds property ids, every other column is one
/// landmark, cells are meters. Empty and `NaN` cells are unrecorded
/// distances.
pub fn load_location_table(path: &Path) -> Result<LocationIndex, LoadError> {
    let file = path.display().to_string();
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(LoadError::MissingColumn {
            file,
            column: "property".to_string(),
        });
    }
    let landmarks: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let property_id = record.get(0).unwrap_or_default().to_string();

        let mut cells = Vec::with_capacity(landmarks.len());
        for value in record.iter().skip(1) {
            cells.push(parse_distance(&file, &property_id, value)?);
        }
        rows.push((property_id, cells));
    }

    Ok(LocationIndex::new(landmarks, rows)?)
}

fn parse_distance(file: &str, property: &str, value: &str) -> Result<Option<f64>, LoadError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }

    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| LoadError::BadDistance {
            file: file.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        })
}

/// Load the property metadata table.
///
/// Requires `property` and `link` columns; an empty link cell means the
/// property has no published listing.
pub fn load_metadata(path: &Path) -> Result<MetadataTable, LoadError> {
    let file = path.display().to_string();
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let property_col = column(&headers, "property").ok_or_else(|| LoadError::MissingColumn {
        file: file.clone(),
        column: "property".to_string(),
    })?;
    let link_col = column(&headers, "link").ok_or_else(|| LoadError::MissingColumn {
        file: file.clone(),
        column: "link".to_string(),
    })?;

    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        let link = record.get(link_col).unwrap_or_default().trim();

        records.push(PropertyRecord {
            property_id: record.get(property_col).unwrap_or_default().to_string(),
            link: if link.is_empty() {
                None
            } else {
                Some(link.to_string())
            },
        });
    }

    Ok(MetadataTable::new(records)?)
}

fn column(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

/// Load every input from `dir` and assemble an engine.
pub fn load_engine(dir: &Path, config: EngineConfig) -> Result<Engine, LoadError> {
    let now = Instant::now();

    let signals = [
        load_matrix(&dir.join(SIMILARITY_FILES[0]))?,
        load_matrix(&dir.join(SIMILARITY_FILES[1]))?,
        load_matrix(&dir.join(SIMILARITY_FILES[2]))?,
    ];
    let store = SimilarityStore::new(signals)?;

    let locations = load_location_table(&dir.join(LOCATIONS_FILE))?;
    let metadata = load_metadata(&dir.join(PROPERTIES_FILE))?;

    let engine = Engine::new(store, locations, metadata, config)?;

    log::debug!(
        "took {}ms to load engine data",
        now.elapsed().as_micros() as f64 / 1000.0
    );

    Ok(engine)
}
