//! Hotel facilities reference data.
//!
//! The catalogue maps facility ids (used to filter availability searches) to
//! names in several languages. It is loaded once at start-up and shared
//! read-only behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::core::error::{Error, Result};

const EMBEDDED: &str = include_str!("../../../data/facilities.json");

/// Languages the catalogue carries translations for.
pub const SUPPORTED_LANGUAGES: [&str; 6] = ["en", "es", "it", "he", "ar", "de"];

/// Translation used when the requested language has none.
const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Deserialize)]
struct Translation {
    lang: String,
    facility: String,
}

#[derive(Debug, Clone, Deserialize)]
struct FacilityRecord {
    facility_id: u32,
    facility: String,
    #[serde(default)]
    sort: u32,
    #[serde(default)]
    translation: Vec<Translation>,
}

impl FacilityRecord {
    fn name_in(&self, lang: &str) -> &str {
        let find = |l: &str| {
            self.translation
                .iter()
                .find(|t| t.lang.eq_ignore_ascii_case(l))
                .map(|t| t.facility.as_str())
        };
        find(lang)
            .or_else(|| find(FALLBACK_LANGUAGE))
            .unwrap_or(&self.facility)
    }
}

/// A facility name in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedFacility {
    pub facility_id: u32,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct FacilityCatalog {
    records: Vec<FacilityRecord>,
}

impl FacilityCatalog {
    /// The catalogue compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED)
    }

    /// Load from `path` when given, otherwise use the embedded catalogue.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let catalog = Self::from_json(&raw)?;
                info!(
                    "Loaded {} facilities from {}",
                    catalog.len(),
                    path.display()
                );
                Ok(catalog)
            }
            None => Self::embedded(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut records: Vec<FacilityRecord> = serde_json::from_str(raw)?;
        if records.is_empty() {
            return Err(Error::config("facilities catalogue is empty"));
        }
        records.sort_by_key(|r| r.sort);
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every facility, named in `lang` (English, then the default name, when
    /// no translation exists).
    pub fn localized(&self, lang: &str) -> Vec<LocalizedFacility> {
        self.records
            .iter()
            .map(|r| LocalizedFacility {
                facility_id: r.facility_id,
                name: r.name_in(lang).to_string(),
            })
            .collect()
    }

    /// One facility by id.
    pub fn find(&self, facility_id: u32, lang: &str) -> Option<LocalizedFacility> {
        self.records
            .iter()
            .find(|r| r.facility_id == facility_id)
            .map(|r| LocalizedFacility {
                facility_id,
                name: r.name_in(lang).to_string(),
            })
    }
}
