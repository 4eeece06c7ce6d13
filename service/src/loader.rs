//! Loading dropdown lists from resource files

use std::path::{Path, PathBuf};

use deposit_core::{
    DepositError, DropdownList, DropdownLists, ListState, Result, dropdown::convert_dropdown_data,
};
use futures::future::join_all;
use tokio::fs;
use tracing::{debug, warn};

/// Reads `<dir>/<listName>.json` for every dropdown list
#[derive(Debug, Clone)]
pub struct DropdownListLoader {
    dir: PathBuf,
}

impl DropdownListLoader {
    /// Loader for the given resource directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The resource directory
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the resource file for a list
    #[must_use]
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Load one list
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a dropdown
    /// resource.
    pub async fn load_list(&self, name: &str) -> Result<DropdownList> {
        let path = self.path_for(name);
        let content = fs::read_to_string(&path).await?;
        let data = serde_json::from_str(&content)?;
        let entries = convert_dropdown_data(data)?;
        debug!(list = name, entries = entries.len(), "loaded dropdown list");
        Ok(DropdownList::fetched(entries))
    }

    /// Load every list concurrently
    ///
    /// A list whose file is missing or malformed is marked `FetchFailed`;
    /// the other lists are unaffected.
    pub async fn load_all(&self) -> DropdownLists {
        let loads = DropdownLists::NAMES
            .iter()
            .map(|name| async move { (*name, self.load_list(name).await) });

        let mut lists = DropdownLists::default();
        for (name, result) in join_all(loads).await {
            let list = match result {
                Ok(list) => list,
                Err(e) => {
                    warn!(list = name, error = %e, "failed to load dropdown list");
                    DropdownList::failed(e.to_string())
                }
            };
            if let Some(slot) = lists.by_name_mut(name) {
                *slot = list;
            }
        }
        lists
    }

    /// Load every list, failing on the first list that cannot be loaded
    ///
    /// # Errors
    ///
    /// Returns `DepositError::Config` naming the first failed list.
    pub async fn load_all_strict(&self) -> Result<DropdownLists> {
        let lists = self.load_all().await;
        for name in DropdownLists::NAMES {
            if let Some(DropdownList {
                state: ListState::FetchFailed(reason),
                ..
            }) = lists.by_name(name)
            {
                return Err(DepositError::config(format!(
                    "dropdown list '{name}' in {}: {reason}",
                    self.dir.display()
                )));
            }
        }
        Ok(lists)
    }
}
