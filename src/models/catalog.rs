use crate::core::deck::first_duplicate_id;
use crate::models::domain::Item;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use validator::Validate;

/// Errors that can occur while loading the item catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid item at position {index}: {source}")]
    Invalid {
        index: usize,
        source: validator::ValidationErrors,
    },

    #[error("Duplicate item id: {0}")]
    DuplicateId(String),
}

/// Ordered list of listings supplied at session start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Catalog {
    /// Load a catalog from a TOML file with an `[[items]]` array
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(raw)?;
        catalog.validate_items()?;
        tracing::debug!("Catalog parsed with {} items", catalog.items.len());
        Ok(catalog)
    }

    /// Every id must be non-empty and unique, the deck relies on it
    pub fn validate_items(&self) -> Result<(), CatalogError> {
        for (index, item) in self.items.iter().enumerate() {
            item.validate()
                .map_err(|source| CatalogError::Invalid { index, source })?;
        }

        match first_duplicate_id(&self.items) {
            Some(id) => Err(CatalogError::DuplicateId(id.to_string())),
            None => Ok(()),
        }
    }

    pub fn into_items(self) -> Vec<Item> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[items]]
id = "w-1"
name = "Spent pickling acid"
generator = "Aceros del Norte"
purity = 88.0
price = "45 EUR/t"
location = "Bilbao, ES"
compatibilityScore = 91.0
description = "Ferrous chloride rich liquor"

[[items]]
id = "w-2"
name = "Glycerin crude"
location = "Hamburg, DE"
compatibilityScore = 64.0
"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items[0].location_tag, "Bilbao, ES");
        assert_eq!(catalog.items[1].base_score, 64.0);
        assert_eq!(catalog.items[1].generator, "");
        assert!(catalog.items[0].enriched_score.is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let raw = format!("{}\n[[items]]\nid = \"w-1\"\nlocation = \"Lyon, FR\"\ncompatibilityScore = 50.0\n", SAMPLE);

        match Catalog::from_toml_str(&raw) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "w-1"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_id_rejected() {
        let raw = "[[items]]\nid = \"\"\nlocation = \"Lyon, FR\"\ncompatibilityScore = 50.0\n";

        assert!(matches!(
            Catalog::from_toml_str(raw),
            Err(CatalogError::Invalid { index: 0, .. })
        ));
    }

    #[test]
    fn test_missing_score_is_parse_error() {
        let raw = "[[items]]\nid = \"w-9\"\nlocation = \"Lyon, FR\"\n";

        assert!(matches!(Catalog::from_toml_str(raw), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::from_toml_str("").unwrap();
        assert!(catalog.is_empty());
    }
}
