//! Resource Registry - central registration of all resources.
//!
//! When adding a new resource family:
//! 1. Create the resource file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here

use rmcp::model::ResourceTemplate;

use super::definitions::FacilitiesResource;
use super::service::{ResourceContent, ResourceEntry};
use crate::domains::travel::SUPPORTED_LANGUAGES;

/// Get all registered resources as ResourceEntries.
pub fn get_all_resources() -> Vec<ResourceEntry> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| ResourceEntry {
            resource: FacilitiesResource::resource(lang),
            content: ResourceContent::Facilities(lang.to_string()),
        })
        .collect()
}

/// Get all registered resource templates (RFC 6570 URI templates).
pub fn get_all_resource_templates() -> Vec<ResourceTemplate> {
    vec![FacilitiesResource::template()]
}

/// Get the list of all resource URIs.
pub fn resource_uris() -> Vec<String> {
    SUPPORTED_LANGUAGES
        .iter()
        .map(|lang| FacilitiesResource::uri(lang))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_all_resources() {
        let resources = get_all_resources();
        assert_eq!(resources.len(), SUPPORTED_LANGUAGES.len());

        let uris: Vec<_> = resources
            .iter()
            .map(|r| r.resource.raw.uri.as_str())
            .collect();
        assert!(uris.contains(&"hotel://facilities/en"));
        assert!(uris.contains(&"hotel://facilities/he"));
    }

    #[test]
    fn test_get_all_resource_templates() {
        let templates = get_all_resource_templates();
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "hotel://facilities/{lang}");
    }

    #[test]
    fn test_resource_uris() {
        let uris = resource_uris();
        assert_eq!(uris.len(), 6);
        assert!(uris.contains(&"hotel://facilities/ar".to_string()));
    }
}
