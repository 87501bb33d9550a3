//! Prompt catalog loading.
//!
//! The catalog is a JSON document of the form
//! `{"prompts": [{"text": "...", "category": "gratitude"}, ...]}`. A default
//! catalog is compiled into the crate; a file path can replace it.

use crate::errors::CatalogError;
use crate::models::PromptCategory;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const BUNDLED_CATALOG: &str = include_str!("../assets/prompts.json");

/// One catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSeed {
    pub text: String,
    pub category: PromptCategory,
}

/// Ordered list of prompts merged into storage at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptCatalog {
    pub prompts: Vec<PromptSeed>,
}

impl PromptCatalog {
    /// Parses a catalog document.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a catalog file.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// The catalog shipped with the crate.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    /// Loads the catalog at `path`, or the bundled one when `path` is `None`.
    ///
    /// A missing or corrupt catalog is logged and yields an empty catalog, so
    /// startup continues with whatever prompts are already stored.
    pub fn load_or_empty(path: Option<&Path>) -> Self {
        let result = match path {
            Some(path) => {
                debug!("Loading prompt catalog from {:?}", path);
                Self::from_path(path)
            }
            None => Self::bundled(),
        };

        match result {
            Ok(catalog) => {
                debug!("Prompt catalog holds {} prompts", catalog.len());
                catalog
            }
            Err(e) => {
                warn!(error = %e, "Failed to load prompt catalog");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::tempdir;

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = PromptCatalog::bundled().unwrap();
        assert!(!catalog.is_empty());

        // Every category is represented and texts are unique
        let categories: HashSet<PromptCategory> =
            catalog.prompts.iter().map(|p| p.category).collect();
        assert_eq!(categories.len(), PromptCategory::ALL.len());
        let texts: HashSet<&str> = catalog.prompts.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts.len(), catalog.len());
    }

    #[test]
    fn test_from_json_keeps_order() {
        let catalog = PromptCatalog::from_json(
            r#"{"prompts": [
                {"text": "Second", "category": "goals"},
                {"text": "First", "category": "growth"}
            ]}"#,
        )
        .unwrap();

        assert_eq!(catalog.prompts[0].text, "Second");
        assert_eq!(catalog.prompts[1].category, PromptCategory::Growth);
    }

    #[test]
    fn test_from_json_rejects_unknown_category() {
        let result =
            PromptCatalog::from_json(r#"{"prompts": [{"text": "x", "category": "astrology"}]}"#);
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_load_or_empty_missing_file() {
        let dir = tempdir().unwrap();
        let catalog = PromptCatalog::load_or_empty(Some(&dir.path().join("missing.json")));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_or_empty_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        fs::write(&path, "{\"prompts\": [").unwrap();

        assert!(PromptCatalog::load_or_empty(Some(&path)).is_empty());
    }

    #[test]
    fn test_load_or_empty_reads_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prompts.json");
        fs::write(
            &path,
            r#"{"prompts": [{"text": "Only one", "category": "mindfulness"}]}"#,
        )
        .unwrap();

        let catalog = PromptCatalog::load_or_empty(Some(&path));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_or_empty_defaults_to_bundled() {
        assert_eq!(
            PromptCatalog::load_or_empty(None),
            PromptCatalog::bundled().unwrap()
        );
    }
}
