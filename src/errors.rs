/// Errors raised by the query paths.
///
/// Queries either fully succeed or fail with one of these; an empty
/// result set is a successful outcome, not an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("unknown property id {0:?}")]
    UnknownProperty(String),

    #[error("unknown landmark {0:?}")]
    UnknownLandmark(String),

    #[error("top_n must be at least 1")]
    ZeroTopN,

    #[error("radius must be non-negative, got {0} km")]
    NegativeRadius(f64),
}

impl QueryError {
    /// True when the query named something that does not exist, as
    /// opposed to passing a malformed argument.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UnknownProperty(_) | Self::UnknownLandmark(_))
    }
}

/// Load-time validation failures.
///
/// Any of these is fatal to constructing the component it was detected
/// in: no partially-validated value escapes the constructor.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataIntegrityError {
    #[error("row {index} has {len} entries, expected {expected}")]
    RaggedRow {
        index: usize,
        len: usize,
        expected: usize,
    },

    #[error("{labels} labels for a matrix with {rows} rows")]
    LabelCountMismatch { labels: usize, rows: usize },

    #[error("duplicate property id {0:?}")]
    DuplicateProperty(String),

    #[error("duplicate landmark {0:?}")]
    DuplicateLandmark(String),

    #[error("similarity matrices disagree in dimension: {expected} vs {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("similarity matrices disagree on the label at position {position}: {expected:?} vs {got:?}")]
    LabelMismatch {
        position: usize,
        expected: String,
        got: String,
    },

    #[error("negative distance {value} m for property {property:?}")]
    NegativeDistance { property: String, value: f64 },

    #[error("{table} table is keyed by {got} properties, the similarity index has {expected}")]
    KeyCountMismatch {
        table: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{table} table does not cover property {property:?}")]
    MissingProperty {
        table: &'static str,
        property: String,
    },
}
