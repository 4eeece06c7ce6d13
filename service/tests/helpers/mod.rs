//! Shared fixtures for the service integration tests
//!
//! ```rust,ignore
//! mod helpers;
//!
//! let lists = helpers::dropdown_lists();
//! let input = helpers::external_fixture("allfields");
//! ```

#![allow(dead_code)]

use std::path::PathBuf;

use deposit_core::{DropdownList, DropdownLists, ExternalMetadata, dropdown::convert_dropdown_data};

/// Directory holding the test fixtures
#[must_use]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Directory holding one resource file per dropdown list
#[must_use]
pub fn lists_dir() -> PathBuf {
    fixtures_dir().join("lists")
}

/// All dropdown lists, read synchronously from the fixture resources
#[must_use]
pub fn dropdown_lists() -> DropdownLists {
    let mut lists = DropdownLists::default();
    for name in DropdownLists::NAMES {
        let path = lists_dir().join(format!("{name}.json"));
        let content = std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
        let data = serde_json::from_str(&content).expect("list resource is JSON");
        let entries = convert_dropdown_data(data).expect("list resource is a dropdown list");
        *lists.by_name_mut(name).expect("known list name") = DropdownList::fetched(entries);
    }
    lists
}

/// An external metadata fixture as raw JSON
#[must_use]
pub fn external_json(name: &str) -> serde_json::Value {
    let path = fixtures_dir().join(format!("{name}.json"));
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("reading {}: {e}", path.display()));
    serde_json::from_str(&content).expect("fixture is JSON")
}

/// An external metadata fixture
#[must_use]
pub fn external_fixture(name: &str) -> ExternalMetadata {
    serde_json::from_value(external_json(name)).expect("fixture is external metadata")
}
