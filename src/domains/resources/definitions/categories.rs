//! Categories resource definition.
//!
//! The `expense://categories` document lists advisory category labels.
//! The list is metadata only: nothing constrains an expense's category to
//! appear in it, and edits to the external file take effect on the next
//! read because nothing is cached.

use std::path::PathBuf;

use super::ResourceDefinition;
use crate::core::config::ResourcesConfig;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// File name looked up next to the server executable when no override
/// path is configured.
const CATEGORIES_FILE_NAME: &str = "categories.json";

/// Expense categories resource (dynamic, re-read on every request).
pub struct CategoriesResource;

impl ResourceDefinition for CategoriesResource {
    const URI: &'static str = "expense://categories";
    const NAME: &'static str = "Expense Categories";
    const DESCRIPTION: &'static str =
        "Advisory list of known expense categories, served as JSON";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::CategoriesFile)
    }
}

impl CategoriesResource {
    /// The hardcoded fallback document.
    pub fn default_document() -> String {
        serde_json::json!({
            "categories": ["Food", "Travel", "Shopping", "Bills", "Other"]
        })
        .to_string()
    }

    /// Load the categories document.
    ///
    /// Returns the external file's raw text verbatim when it can be read
    /// (no parsing or validation), and the default document on ANY failure.
    /// This is the deliberate attempt/fallback-on-any-failure policy:
    /// a missing or unreadable file is never surfaced to the caller.
    pub fn load(config: &ResourcesConfig) -> String {
        Self::read_external(config).unwrap_or_else(Self::default_document)
    }

    /// Try to read the external categories file; `None` on any failure.
    fn read_external(config: &ResourcesConfig) -> Option<String> {
        let path = Self::categories_path(config)?;
        std::fs::read_to_string(path).ok()
    }

    /// Resolve the file location: the configured override, or
    /// `categories.json` alongside the server executable.
    fn categories_path(config: &ResourcesConfig) -> Option<PathBuf> {
        match &config.categories_file {
            Some(path) => Some(path.clone()),
            None => Some(
                std::env::current_exe()
                    .ok()?
                    .parent()?
                    .join(CATEGORIES_FILE_NAME),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_categories_metadata() {
        assert_eq!(CategoriesResource::URI, "expense://categories");
        assert_eq!(CategoriesResource::MIME_TYPE, "application/json");
    }

    #[test]
    fn test_default_document_exact() {
        assert_eq!(
            CategoriesResource::default_document(),
            r#"{"categories":["Food","Travel","Shopping","Bills","Other"]}"#
        );
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = ResourcesConfig {
            categories_file: Some(PathBuf::from("/nonexistent/categories.json")),
        };
        assert_eq!(
            CategoriesResource::load(&config),
            CategoriesResource::default_document()
        );
    }

    #[test]
    fn test_external_file_returned_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");

        // Deliberately unusual formatting; content must come back untouched.
        let content = "{\n  \"categories\": [\"Rent\", \"Gifts\"]\n}\n";
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let config = ResourcesConfig {
            categories_file: Some(path),
        };
        assert_eq!(CategoriesResource::load(&config), content);
    }

    #[test]
    fn test_file_edits_take_effect_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categories.json");
        let config = ResourcesConfig {
            categories_file: Some(path.clone()),
        };

        std::fs::write(&path, r#"{"categories":["A"]}"#).unwrap();
        assert_eq!(CategoriesResource::load(&config), r#"{"categories":["A"]}"#);

        // No caching: the next read sees the new content.
        std::fs::write(&path, r#"{"categories":["B"]}"#).unwrap();
        assert_eq!(CategoriesResource::load(&config), r#"{"categories":["B"]}"#);

        // Deleting the file drops back to the default.
        std::fs::remove_file(&path).unwrap();
        assert_eq!(
            CategoriesResource::load(&config),
            CategoriesResource::default_document()
        );
    }
}
