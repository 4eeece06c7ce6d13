//! External metadata document
//!
//! This is the shape exchanged with the deposit API. Controlled values are
//! tagged with a scheme (their encoding or authority) and, for dates and
//! relations, a qualifier (their semantic role). Absent values are omitted
//! when serialized.

use serde::{Deserialize, Serialize};

/// Well-known schemes, qualifiers and keys used in deposit metadata
pub mod vocab {
    /// ISO 639-2 language codes
    pub const SCHEME_LANGUAGE: &str = "dcterms:ISO639-2";
    /// NARCIS discipline types
    pub const SCHEME_AUDIENCE: &str = "narcis:DisciplineType";
    /// ABR complex subjects
    pub const SCHEME_ABR_COMPLEX: &str = "abr:ABRcomplex";
    /// ABR periods
    pub const SCHEME_ABR_PERIODE: &str = "abr:ABRperiode";
    /// ISO 3166 country codes
    pub const SCHEME_ISO3166: &str = "dcterms:ISO3166";
    /// Internet media types
    pub const SCHEME_IMT: &str = "dcterms:IMT";
    /// W3C date-time format
    pub const SCHEME_W3CDTF: &str = "dcterms:W3CDTF";
    /// DataCite contributor types
    pub const SCHEME_CONTRIBUTOR_TYPE: &str = "datacite:contributorType";

    /// DOI identifier scheme
    pub const ID_DOI: &str = "id-type:DOI";
    /// ORCID identifier scheme
    pub const ID_ORCID: &str = "id-type:ORCID";

    /// Creation date
    pub const QUALIFIER_CREATED: &str = "dcterms:created";
    /// Availability date
    pub const QUALIFIER_AVAILABLE: &str = "dcterms:available";
    /// Generic date
    pub const QUALIFIER_DATE: &str = "dcterms:date";
    /// Generic relation
    pub const QUALIFIER_RELATION: &str = "dcterms:relation";

    /// Contributor role marking a rights holder
    pub const ROLE_RIGHTS_HOLDER: &str = "RightsHolder";
}

/// A value optionally tagged with a scheme
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemedValue {
    /// Encoding or authority of the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// The value itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SchemedValue {
    /// Value without a scheme
    pub fn free(value: impl Into<String>) -> Self {
        Self {
            scheme: None,
            value: Some(value.into()),
        }
    }

    /// Value with a scheme
    pub fn schemed(scheme: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            scheme: Some(scheme.into()),
            value: Some(value.into()),
        }
    }
}

/// A controlled-vocabulary value: scheme, key and the resolved value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemedKeyValue {
    /// Vocabulary the key belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Key in the vocabulary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Value belonging to the key, or free text when there is no scheme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl SchemedKeyValue {
    /// Free-text value
    pub fn free(value: impl Into<String>) -> Self {
        Self {
            scheme: None,
            key: None,
            value: Some(value.into()),
        }
    }

    /// Controlled value
    pub fn controlled(
        scheme: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            scheme: Some(scheme.into()),
            key: Some(key.into()),
            value: Some(value.into()),
        }
    }
}

/// A value with a qualifier (semantic role) and scheme (encoding)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifiedSchemedValue {
    /// Role of the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    /// Encoding of the value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// The value itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A relation to another resource
///
/// Identifier relations carry a scheme and value, link relations a url and
/// title. A relation with only a qualifier counts as a link relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Kind of relation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
    /// Identifier scheme
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Identifier value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Link target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Link title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Relation {
    /// Whether this relation points at an identifier rather than a link
    #[must_use]
    pub fn is_identifier(&self) -> bool {
        self.url.is_none() && self.title.is_none() && (self.scheme.is_some() || self.value.is_some())
    }
}

/// A person or organization involved with the dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    /// Academic titles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titles: Option<String>,
    /// Initials
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initials: Option<String>,
    /// Surname prefix (e.g. "van der")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertions: Option<String>,
    /// Surname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    /// Person identifiers (ORCID, ISNI, ...)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ids: Vec<SchemedValue>,
    /// Role of the contributor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<SchemedKeyValue>,
    /// Organization name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
}

impl Contributor {
    /// Whether the contributor has the rights-holder role
    #[must_use]
    pub fn is_rights_holder(&self) -> bool {
        self.role
            .as_ref()
            .and_then(|role| role.key.as_deref())
            .is_some_and(|key| key == vocab::ROLE_RIGHTS_HOLDER)
    }
}

/// Access category of the deposited files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessRight {
    /// Files are openly accessible
    #[default]
    OpenAccess,
    /// Access must be requested
    RequestPermission,
}

/// Whether the dataset contains privacy-sensitive data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivacySensitiveDataPresent {
    /// Contains privacy-sensitive data
    Yes,
    /// Contains no privacy-sensitive data
    No,
    /// Not yet stated
    Unspecified,
}

/// Geographic point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialPoint {
    /// Coordinate system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// X coordinate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<String>,
    /// Y coordinate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
}

/// Geographic bounding box
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpatialBox {
    /// Coordinate system
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Northern bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub north: Option<String>,
    /// Eastern bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub east: Option<String>,
    /// Southern bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub south: Option<String>,
    /// Western bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub west: Option<String>,
}

/// The external metadata document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalMetadata {
    /// Reserved DOI of the dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Language the metadata is written in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_of_description: Option<SchemedKeyValue>,
    /// Titles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,
    /// Alternative titles
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_titles: Vec<String>,
    /// Descriptions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub descriptions: Vec<String>,
    /// Creators
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub creators: Vec<Contributor>,
    /// Contributors, rights holders included
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributors: Vec<Contributor>,
    /// Target audiences
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audiences: Vec<SchemedKeyValue>,
    /// Subjects, controlled and free
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<SchemedKeyValue>,
    /// Alternative identifiers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_identifiers: Vec<SchemedValue>,
    /// Relations, identifier relations first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,
    /// Languages of the deposited files
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub languages_of_files: Vec<SchemedKeyValue>,
    /// Dates
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dates: Vec<QualifiedSchemedValue>,
    /// Sources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<String>,
    /// Instructions for reuse
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions_for_reuse: Vec<String>,
    /// Publishers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub publishers: Vec<String>,
    /// Access rights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_rights: Option<AccessRight>,
    /// License key
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// DCMI types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types_dcmi: Vec<String>,
    /// Other types, free text
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Formats
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub formats: Vec<SchemedValue>,
    /// Temporal coverages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub temporal_coverages: Vec<SchemedKeyValue>,
    /// Spatial points
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spatial_points: Vec<SpatialPoint>,
    /// Spatial boxes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spatial_boxes: Vec<SpatialBox>,
    /// Spatial coverages
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spatial_coverages: Vec<SchemedKeyValue>,
    /// Message for the data manager
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_for_data_manager: Option<String>,
    /// Privacy-sensitive data statement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_sensitive_data_present: Option<PrivacySensitiveDataPresent>,
    /// Whether the depositor accepted the deposit agreement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_deposit_agreement: Option<bool>,
}
