//! Listing metadata keyed by property id.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::DataIntegrityError;

/// One property's listing metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub property_id: String,

    /// Listing URL; absent for properties without a published listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Lookup table from property id to its record.
pub struct MetadataTable {
    records: HashMap<String, PropertyRecord>,
}

impl MetadataTable {
    /// Rejects duplicate property ids.
    pub fn new(records: Vec<PropertyRecord>) -> Result<Self, DataIntegrityError> {
        let mut table = HashMap::with_capacity(records.len());
        for record in records {
            let id = record.property_id.clone();
            if table.insert(id.clone(), record).is_some() {
                return Err(DataIntegrityError::DuplicateProperty(id));
            }
        }
        Ok(Self { records: table })
    }

    /// Listing URL for a property, when one is recorded.
    pub fn link(&self, property_id: &str) -> Option<&str> {
        self.records
            .get(property_id)
            .and_then(|record| record.link.as_deref())
    }

    pub fn contains(&self, property_id: &str) -> bool {
        self.records.contains_key(property_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, link: Option<&str>) -> PropertyRecord {
        PropertyRecord {
            property_id: id.to_string(),
            link: link.map(|url| url.to_string()),
        }
    }

    #[test]
    fn test_link_lookup() {
        let table = MetadataTable::new(vec![
            record("P1", Some("https://example.com/p1")),
            record("P2", None),
        ])
        .unwrap();

        assert_eq!(table.link("P1"), Some("https://example.com/p1"));
        assert_eq!(table.link("P2"), None);
        assert_eq!(table.link("P3"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = MetadataTable::new(vec![record("P1", None), record("P1", None)]);
        assert!(matches!(
            result,
            Err(DataIntegrityError::DuplicateProperty(id)) if id == "P1"
        ));
    }
}
