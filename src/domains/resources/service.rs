//! Resource service implementation.
//!
//! The ResourceService manages resource discovery and access. Resources are
//! defined in `definitions/` and registered via `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents, ResourceTemplate};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::definitions::FacilitiesResource;
use super::error::ResourceError;
use super::registry::{get_all_resource_templates, get_all_resources};
use crate::domains::travel::FacilityCatalog;

/// Service for listing and reading resources.
pub struct ResourceService {
    facilities: Arc<FacilityCatalog>,

    /// Key: resource URI.
    resources: BTreeMap<String, ResourceEntry>,

    templates: Vec<ResourceTemplate>,
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

    /// The facility catalogue rendered in a language.
    Facilities(String),
}

impl ResourceService {
    pub fn new(facilities: Arc<FacilityCatalog>) -> Self {
        let mut service = Self {
            facilities,
            resources: BTreeMap::new(),
            templates: get_all_resource_templates(),
        };

        for entry in get_all_resources() {
            service.register_resource(entry);
        }
        info!(
            "Initialized ResourceService with {} resources and {} templates",
            service.resources.len(),
            service.templates.len()
        );

        service
    }

    /// Register a resource.
    pub fn register_resource(&mut self, entry: ResourceEntry) {
        debug!("Registering resource: {}", entry.resource.raw.uri);
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

    /// List all available resource templates.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        self.templates.clone()
    }

    /// Read a resource by URI.
    ///
    /// Registered URIs are served directly. Other `hotel://facilities/{lang}`
    /// URIs are resolved through the template.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let content = match self.resources.get(uri) {
            Some(entry) => self.render(uri, &entry.content)?,
            None => match FacilitiesResource::language(uri) {
                Some(language) => FacilitiesResource::read(&self.facilities, &language?, uri)?,
                None => return Err(ResourceError::not_found(uri)),
            },
        };

        Ok(ReadResourceResult {
            contents: vec![content],
        })
    }

    fn render(&self, uri: &str, content: &ResourceContent) -> Result<ResourceContents, ResourceError> {
        match content {
            ResourceContent::Text(text) => Ok(ResourceContents::text(text, uri)),
            ResourceContent::Facilities(language) => {
                FacilitiesResource::read(&self.facilities, language, uri)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::AnnotateAble;
    use rmcp::model::RawResource;

    fn service() -> ResourceService {
        ResourceService::new(Arc::new(FacilityCatalog::embedded().unwrap()))
    }

    fn text(result: &ReadResourceResult) -> &str {
        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, .. } => text,
            _ => panic!("Expected text contents"),
        }
    }

    #[tokio::test]
    async fn test_lists_one_resource_per_language() {
        let service = service();

        let resources = service.list_resources().await;
        assert_eq!(resources.len(), 6);
        assert_eq!(service.list_resource_templates().await.len(), 1);
    }

    #[tokio::test]
    async fn test_read_registered_language() {
        let result = service().read_resource("hotel://facilities/it").await;

        let result = tokio_test::assert_ok!(result);
        let doc: serde_json::Value = serde_json::from_str(text(&result)).unwrap();
        assert_eq!(doc["language"], "it");
    }

    #[tokio::test]
    async fn test_template_language_falls_back() {
        let service = service();

        let fr = service.read_resource("hotel://facilities/fr").await.unwrap();
        let en = service.read_resource("hotel://facilities/en").await.unwrap();

        let fr: serde_json::Value = serde_json::from_str(text(&fr)).unwrap();
        let en: serde_json::Value = serde_json::from_str(text(&en)).unwrap();
        assert_eq!(fr["facilities"], en["facilities"]);
    }

    #[tokio::test]
    async fn test_read_unknown_resource() {
        let service = service();

        assert!(matches!(
            service.read_resource("hotel://nonexistent").await,
            Err(ResourceError::NotFound(_))
        ));
        assert!(matches!(
            service.read_resource("hotel://facilities/../etc").await,
            Err(ResourceError::InvalidUri(_))
        ));
    }

    #[tokio::test]
    async fn test_register_static_resource() {
        let mut service = service();
        service.register_resource(ResourceEntry {
            resource: RawResource::new("hotel://notes", "Notes").no_annotation(),
            content: ResourceContent::Text("hello".to_string()),
        });

        let result = service.read_resource("hotel://notes").await.unwrap();
        assert_eq!(text(&result), "hello");
    }
}
