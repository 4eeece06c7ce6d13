//! Form metadata document
//!
//! The editor works on a flattened copy of the external document: free text
//! is a plain string (empty means unset), dropdown selections are keys, and
//! groups that mix controlled and free entries are split into two arrays.

use serde::{Deserialize, Serialize};

use crate::external::{AccessRight, PrivacySensitiveDataPresent};

/// Identifier or typed value row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSchemedValue {
    /// Selected scheme key
    pub scheme: String,
    /// Entered value
    pub value: String,
}

impl FormSchemedValue {
    /// Row with a scheme and value
    pub fn new(scheme: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            value: value.into(),
        }
    }

    /// Whether nothing was entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheme.is_empty() && self.value.is_empty()
    }
}

/// Related identifier row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormQualifiedSchemedValue {
    /// Relation qualifier key
    pub qualifier: String,
    /// Identifier scheme key
    pub scheme: String,
    /// Identifier value
    pub value: String,
}

impl FormQualifiedSchemedValue {
    /// Whether nothing was entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qualifier.is_empty() && self.scheme.is_empty() && self.value.is_empty()
    }
}

/// Link relation row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormRelation {
    /// Relation qualifier key
    pub qualifier: String,
    /// Link target
    pub url: String,
    /// Link title
    pub title: String,
}

impl FormRelation {
    /// Whether nothing was entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qualifier.is_empty() && self.url.is_empty() && self.title.is_empty()
    }
}

/// Date row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormQualifiedValue {
    /// Date qualifier key
    pub qualifier: String,
    /// Date value
    pub value: String,
}

impl FormQualifiedValue {
    /// Whether nothing was entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.qualifier.is_empty() && self.value.is_empty()
    }
}

/// Creator, contributor or rights holder row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormContributor {
    /// Academic titles
    pub titles: String,
    /// Initials
    pub initials: String,
    /// Surname prefix
    pub insertions: String,
    /// Surname
    pub surname: String,
    /// Person identifiers
    pub ids: Vec<FormSchemedValue>,
    /// Role key; unused for rights holders
    pub role: String,
    /// Organization name
    pub organization: String,
}

impl FormContributor {
    /// Whether nothing was entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
            && self.initials.is_empty()
            && self.insertions.is_empty()
            && self.surname.is_empty()
            && self.role.is_empty()
            && self.organization.is_empty()
            && self.ids.iter().all(FormSchemedValue::is_empty)
    }
}

/// Spatial point row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSpatialPoint {
    /// Coordinate system key
    pub scheme: String,
    /// X coordinate
    pub x: String,
    /// Y coordinate
    pub y: String,
}

impl FormSpatialPoint {
    /// Whether nothing was entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheme.is_empty() && self.x.is_empty() && self.y.is_empty()
    }
}

/// Spatial box row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSpatialBox {
    /// Coordinate system key
    pub scheme: String,
    /// Northern bound
    pub north: String,
    /// Eastern bound
    pub east: String,
    /// Southern bound
    pub south: String,
    /// Western bound
    pub west: String,
}

impl FormSpatialBox {
    /// Whether nothing was entered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scheme.is_empty()
            && self.north.is_empty()
            && self.east.is_empty()
            && self.south.is_empty()
            && self.west.is_empty()
    }
}

/// The form metadata document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormMetadata {
    /// Reserved DOI
    pub doi: String,
    /// Language of description key
    pub language_of_description: String,
    /// Titles
    pub titles: Vec<String>,
    /// Alternative titles
    pub alternative_titles: Vec<String>,
    /// Descriptions
    pub descriptions: Vec<String>,

    /// Creators
    pub creators: Vec<FormContributor>,
    /// Contributors other than rights holders
    pub contributors: Vec<FormContributor>,
    /// Rights holders
    pub rights_holders: Vec<FormContributor>,

    /// Audience keys
    pub audiences: Vec<String>,
    /// Free subjects
    pub subjects: Vec<String>,
    /// ABR complex subject keys
    pub subjects_abr_complex: Vec<String>,

    /// Alternative identifiers
    pub alternative_identifiers: Vec<FormSchemedValue>,
    /// Identifier relations
    pub related_identifiers: Vec<FormQualifiedSchemedValue>,
    /// Link relations
    pub relations: Vec<FormRelation>,

    /// ISO 639-2 language keys
    pub languages_of_files_iso639: Vec<String>,
    /// Free languages
    pub languages_of_files: Vec<String>,

    /// Creation date
    pub date_created: String,
    /// Availability date
    pub date_available: String,
    /// Other W3CDTF dates
    pub dates_iso8601: Vec<FormQualifiedValue>,
    /// Other free dates
    pub dates: Vec<FormQualifiedValue>,

    /// Sources
    pub sources: Vec<String>,
    /// Instructions for reuse
    pub instructions_for_reuse: Vec<String>,
    /// Publishers
    pub publishers: Vec<String>,

    /// Access rights
    pub access_rights: AccessRight,
    /// License key
    pub license: String,

    /// DCMI type keys
    pub types_dcmi: Vec<String>,
    /// Free types
    pub types: Vec<String>,
    /// Media type keys
    pub formats_media_type: Vec<String>,
    /// Free formats
    pub formats: Vec<String>,

    /// ABR period keys
    pub temporal_coverages_abr: Vec<String>,
    /// Free temporal coverages
    pub temporal_coverages: Vec<String>,

    /// Spatial points
    pub spatial_points: Vec<FormSpatialPoint>,
    /// Spatial boxes
    pub spatial_boxes: Vec<FormSpatialBox>,
    /// ISO 3166 country keys
    pub spatial_coverage_iso: Vec<String>,
    /// Free spatial coverages
    pub spatial_coverages: Vec<String>,

    /// Message for the data manager
    pub message_for_data_manager: String,
    /// Privacy-sensitive data statement
    pub privacy_sensitive_data_present: Option<PrivacySensitiveDataPresent>,
    /// Deposit agreement acceptance
    pub accept_deposit_agreement: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributor_with_only_empty_ids_is_empty() {
        let contributor = FormContributor {
            ids: vec![FormSchemedValue::default()],
            ..Default::default()
        };
        assert!(contributor.is_empty());
    }

    #[test]
    fn test_form_fields_are_camel_case() {
        let form = FormMetadata {
            rights_holders: vec![FormContributor::default()],
            ..Default::default()
        };
        let value = serde_json::to_value(&form).unwrap();
        assert!(value.get("rightsHolders").is_some());
        assert!(value.get("languagesOfFilesIso639").is_some());
        assert_eq!(value["accessRights"], "OPEN_ACCESS");
    }
}
