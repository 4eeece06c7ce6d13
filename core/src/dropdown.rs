//! Dropdown lists: controlled-vocabulary reference data
//!
//! Each list is an ordered sequence of entries plus the state of its fetch.
//! The converters only read these lists; ownership stays with whoever
//! loaded them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DepositError, Result};

/// One entry of a dropdown list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DropdownListEntry {
    /// Controlled key, stored in documents
    pub key: String,
    /// Canonical value belonging to the key
    pub value: String,
    /// Text shown in the editor
    pub display_value: String,
    /// Lookup URL template (`%s` is replaced by an identifier)
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl DropdownListEntry {
    /// Create an entry whose display value equals its value
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            key: key.into(),
            display_value: value.clone(),
            value,
            base_url: None,
        }
    }

    /// Attach a lookup URL template
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Fetch state of a dropdown list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListState {
    /// Nothing requested yet
    #[default]
    NotFetched,
    /// Request in flight
    Fetching,
    /// List available
    Fetched,
    /// Fetch failed with the given message
    FetchFailed(String),
}

/// A dropdown list together with its fetch state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropdownList {
    /// Entries in display order
    pub list: Vec<DropdownListEntry>,
    /// Fetch state
    pub state: ListState,
}

impl DropdownList {
    /// A fetched list with the given entries
    #[must_use]
    pub fn fetched(list: Vec<DropdownListEntry>) -> Self {
        Self {
            list,
            state: ListState::Fetched,
        }
    }

    /// A list whose fetch failed
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            list: Vec::new(),
            state: ListState::FetchFailed(message.into()),
        }
    }

    /// Whether the list has been fetched successfully
    #[must_use]
    pub fn is_fetched(&self) -> bool {
        self.state == ListState::Fetched
    }

    /// Entries usable for lookups; empty unless fetched
    #[must_use]
    pub fn entries(&self) -> &[DropdownListEntry] {
        if self.is_fetched() { &self.list } else { &[] }
    }

    /// Find an entry by key
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&DropdownListEntry> {
        self.list.iter().find(|entry| entry.key == key)
    }

    /// Whether the key is present
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }
}

macro_rules! dropdown_lists {
    ($($field:ident => $name:literal),* $(,)?) => {
        /// All dropdown lists used by the deposit form
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct DropdownLists {
            $(
                #[doc = concat!("The `", $name, "` list")]
                #[serde(default)]
                pub $field: DropdownList,
            )*
        }

        impl DropdownLists {
            /// Resource names of all lists, in declaration order
            pub const NAMES: &'static [&'static str] = &[$($name),*];

            /// Look up a list by its resource name
            #[must_use]
            pub fn by_name(&self, name: &str) -> Option<&DropdownList> {
                match name {
                    $($name => Some(&self.$field),)*
                    _ => None,
                }
            }

            /// Mutable lookup by resource name
            pub fn by_name_mut(&mut self, name: &str) -> Option<&mut DropdownList> {
                match name {
                    $($name => Some(&mut self.$field),)*
                    _ => None,
                }
            }
        }
    };
}

dropdown_lists! {
    languages => "languages",
    contributor_ids => "contributorIds",
    contributor_roles => "contributorRoles",
    audiences => "audiences",
    identifiers => "identifiers",
    relations => "relations",
    dates => "dates",
    licenses => "licenses",
    dcmi_types => "dcmiTypes",
    imt_formats => "imtFormats",
    abr_complex_subjects => "abrComplexSubjects",
    abr_periode_temporals => "abrPeriodeTemporals",
    spatial_coordinates => "spatialCoordinates",
    spatial_coverages_iso => "spatialCoveragesIso",
}

/// Raw shape of an entry in a resource file
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    key: String,
    value: String,
    display_value: Option<String>,
    #[serde(rename = "baseURL")]
    base_url: Option<String>,
}

/// Convert a dropdown resource (a JSON array) into list entries
///
/// A missing `displayValue` falls back to `value`.
///
/// # Errors
///
/// Returns `DepositError::Metadata` when the resource is not an array of
/// `{key, value}` objects.
pub fn convert_dropdown_data(data: Value) -> Result<Vec<DropdownListEntry>> {
    if !data.is_array() {
        return Err(DepositError::metadata(
            "dropdown resource must be a JSON array",
        ));
    }

    let raw: Vec<RawEntry> = serde_json::from_value(data)?;
    Ok(raw
        .into_iter()
        .map(|entry| DropdownListEntry {
            display_value: entry.display_value.unwrap_or_else(|| entry.value.clone()),
            key: entry.key,
            value: entry.value,
            base_url: entry.base_url,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_convert_defaults_display_value() -> Result<()> {
        let entries = convert_dropdown_data(json!([
            {"key": "eng", "value": "English"},
            {"key": "nld", "value": "Dutch", "displayValue": "Nederlands"},
        ]))?;

        assert_eq!(entries[0].display_value, "English");
        assert_eq!(entries[1].display_value, "Nederlands");
        Ok(())
    }

    #[test]
    fn test_convert_keeps_base_url() -> Result<()> {
        let entries = convert_dropdown_data(json!([
            {"key": "id-type:ORCID", "value": "ORCID", "baseURL": "https://pub.orcid.org/v2.1/search?q=orcid:%s"},
        ]))?;

        assert_eq!(
            entries[0].base_url.as_deref(),
            Some("https://pub.orcid.org/v2.1/search?q=orcid:%s")
        );
        Ok(())
    }

    #[test]
    fn test_convert_rejects_object() {
        let result = convert_dropdown_data(json!({"eng": "English"}));
        assert!(matches!(result, Err(DepositError::Metadata(_))));
    }

    #[test]
    fn test_entries_empty_until_fetched() {
        let list = DropdownList {
            list: vec![DropdownListEntry::new("a", "A")],
            state: ListState::Fetching,
        };
        assert!(list.entries().is_empty());
        assert!(list.contains("a"));
    }

    #[test]
    fn test_by_name_round_trips_all_names() {
        let mut lists = DropdownLists::default();
        for name in DropdownLists::NAMES {
            assert!(lists.by_name_mut(name).is_some(), "missing list {name}");
        }
        assert!(lists.by_name("unknown").is_none());
    }
}
