//! Property recommendation engine.
//!
//! Ranks properties by a weighted combination of three precomputed
//! similarity signals, and finds properties within a given distance of a
//! named landmark. The crate is a library: a presentation layer supplies
//! the selection inputs and renders the returned rows.
//!
//! All data is loaded once and never mutated afterwards. Queries are pure
//! reads over in-memory structures, so a single [`Engine`] value can serve
//! concurrent callers without locking; refreshing the data means building
//! a new engine and swapping the handle.

pub mod config;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod location;
pub mod metadata;
pub mod similarity;

#[cfg(test)]
mod tests;

pub use config::EngineConfig;
pub use engine::Engine;
pub use errors::{DataIntegrityError, QueryError};
pub use loader::{load_engine, LoadError};
pub use location::{LocationIndex, NearbyProperty};
pub use metadata::{MetadataTable, PropertyRecord};
pub use similarity::{Recommendation, SimilarityMatrix, SimilarityStore, SimilarityWeights};
