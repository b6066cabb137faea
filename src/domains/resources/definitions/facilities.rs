//! Localized facility catalogue, one resource per language.

use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, Resource, ResourceContents, ResourceTemplate,
};
use serde::Serialize;

use crate::domains::resources::error::ResourceError;
use crate::domains::travel::{FacilityCatalog, LocalizedFacility};

#[derive(Debug, Serialize)]
struct FacilitiesDocument {
    language: String,
    count: usize,
    facilities: Vec<LocalizedFacility>,
}

/// `hotel://facilities/{lang}`
pub struct FacilitiesResource;

impl FacilitiesResource {
    pub const URI_PREFIX: &'static str = "hotel://facilities/";
    pub const URI_TEMPLATE: &'static str = "hotel://facilities/{lang}";
    pub const NAME: &'static str = "Hotel Facilities";
    pub const DESCRIPTION: &'static str =
        "Hotel facilities with the IDs accepted by the facilities filter of search_hotels";
    pub const MIME_TYPE: &'static str = "application/json";

    pub fn uri(language: &str) -> String {
        format!("{}{}", Self::URI_PREFIX, language)
    }

    /// Language code addressed by `uri`, if it belongs to this family.
    ///
    /// Codes are two or three ASCII letters; anything else is an invalid URI.
    pub fn language(uri: &str) -> Option<Result<String, ResourceError>> {
        let code = uri.strip_prefix(Self::URI_PREFIX)?;
        let valid = (2..=3).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphabetic());
        Some(if valid {
            Ok(code.to_ascii_lowercase())
        } else {
            Err(ResourceError::invalid_uri(uri))
        })
    }

    /// Listing entry for one language.
    pub fn resource(language: &str) -> Resource {
        let mut raw = RawResource::new(Self::uri(language), format!("{} ({language})", Self::NAME));
        raw.description = Some(Self::DESCRIPTION.to_string());
        raw.mime_type = Some(Self::MIME_TYPE.to_string());
        raw.no_annotation()
    }

    pub fn template() -> ResourceTemplate {
        RawResourceTemplate {
            uri_template: Self::URI_TEMPLATE.to_string(),
            name: Self::NAME.to_string(),
            title: Some("Hotel Facilities by Language".to_string()),
            description: Some(format!(
                "{}. Names without a translation fall back to English.",
                Self::DESCRIPTION
            )),
            mime_type: Some(Self::MIME_TYPE.to_string()),
        }
        .no_annotation()
    }

    /// Render the catalogue in `language` as JSON.
    pub fn read(
        catalog: &FacilityCatalog,
        language: &str,
        uri: &str,
    ) -> Result<ResourceContents, ResourceError> {
        let facilities = catalog.localized(language);
        let document = FacilitiesDocument {
            language: language.to_string(),
            count: facilities.len(),
            facilities,
        };

        Ok(ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some(Self::MIME_TYPE.to_string()),
            text: serde_json::to_string_pretty(&document)?,
            meta: None,
        })
    }
}
