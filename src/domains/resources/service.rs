//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access.
//! It maintains a registry of available resources and handles read requests.
//!
//! Resources are defined in `definitions/` and registered via `registry.rs`.
//! Adding a new resource does NOT require modifying this file.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::HashMap;
use tracing::info;

use super::definitions::CategoriesResource;
use super::error::ResourceError;
use super::registry::get_all_resources;
use crate::core::config::ResourcesConfig;

/// Service for managing and accessing resources.
///
/// This service maintains a registry of available resources and handles
/// resource listing and reading operations.
pub struct ResourceService {
    /// Configuration for the resources domain.
    config: ResourcesConfig,

    /// Registry of available resources.
    /// Key: resource URI, Value: resource metadata
    resources: HashMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Dynamic content resolved at read time.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone)]
pub enum DynamicResourceType {
    /// The categories document: external file if readable, default
    /// otherwise. Re-read on every request, never cached.
    CategoriesFile,
}

impl ResourceService {
    /// Create a new ResourceService with the given configuration.
    pub fn new(config: ResourcesConfig) -> Self {
        info!("Initializing ResourceService");

        let mut service = Self {
            config,
            resources: HashMap::new(),
        };

        // Register all resources from registry
        service.register_from_registry();

        service
    }

    /// Register all resources from the registry.
    fn register_from_registry(&mut self) {
        info!("Registering resources from registry");
        for entry in get_all_resources() {
            self.register_resource(entry);
        }
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        info!("Registering resource: {}", entry.resource.raw.uri);
        self.resources
            .insert(entry.resource.raw.uri.to_string(), entry);
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        let content = match &entry.content {
            ResourceContent::Text(text) => ResourceContents::text(text, uri),
            ResourceContent::Dynamic(dynamic_type) => {
                self.resolve_dynamic_content(uri, dynamic_type)
            }
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    /// Resolve dynamic resource content.
    ///
    /// Infallible on purpose: the only dynamic resource swallows its read
    /// errors and falls back to a default document.
    fn resolve_dynamic_content(
        &self,
        uri: &str,
        dynamic_type: &DynamicResourceType,
    ) -> ResourceContents {
        match dynamic_type {
            DynamicResourceType::CategoriesFile => {
                ResourceContents::text(CategoriesResource::load(&self.config), uri)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::{AnnotateAble, RawResource};

    #[tokio::test]
    async fn test_resource_service_creation() {
        let config = ResourcesConfig::default();
        let service = ResourceService::new(config);

        let resources = service.list_resources().await;
        assert!(!resources.is_empty());
    }

    #[tokio::test]
    async fn test_read_categories_resource() {
        let config = ResourcesConfig::default();
        let service = ResourceService::new(config);

        let result = service.read_resource("expense://categories").await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let config = ResourcesConfig::default();
        let service = ResourceService::new(config);

        let result = service.read_resource("expense://nonexistent").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_registered_text_resource_served_as_is() {
        let config = ResourcesConfig::default();
        let mut service = ResourceService::new(config);

        let mut raw = RawResource::new("expense://test/static", "Static Test");
        raw.mime_type = Some("text/plain".to_string());
        service.register_resource(ResourceEntry {
            resource: raw.no_annotation(),
            content: ResourceContent::Text("hello".to_string()),
        });

        let result = service.read_resource("expense://test/static").await.unwrap();
        assert_eq!(result.contents.len(), 1);
    }
}
