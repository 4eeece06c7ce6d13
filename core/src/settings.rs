//! Settings for the deposit metadata tools
//!
//! Settings are read from a TOML file; every field has a default so an empty
//! file (or no file) is valid. `DEPOSIT_DROPDOWN_DIR` overrides the dropdown
//! resource directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DepositError, Result};

/// Environment variable overriding [`DepositSettings::dropdown_dir`]
pub const DROPDOWN_DIR_ENV: &str = "DEPOSIT_DROPDOWN_DIR";

/// Top-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepositSettings {
    /// Directory holding one `<listName>.json` file per dropdown list
    pub dropdown_dir: PathBuf,
    /// Default tracing filter when `RUST_LOG` is not set
    pub log_filter: String,
    /// Identifier lookup settings
    pub orcid: OrcidSettings,
}

impl Default for DepositSettings {
    fn default() -> Self {
        Self {
            dropdown_dir: PathBuf::from("resources/constants"),
            log_filter: "info".to_string(),
            orcid: OrcidSettings::default(),
        }
    }
}

/// Settings for remote identifier lookups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrcidSettings {
    /// Value of the `Accept` header
    pub accept: String,
    /// Per-request timeout; none by default
    #[serde(with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<Duration>,
    /// Value of the `User-Agent` header
    pub user_agent: String,
}

impl Default for OrcidSettings {
    fn default() -> Self {
        Self {
            accept: "application/json".to_string(),
            request_timeout: None,
            user_agent: concat!("deposit-metadata/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl DepositSettings {
    /// Parse settings from TOML text
    ///
    /// # Errors
    ///
    /// Returns `DepositError::Config` when the text is not valid TOML for
    /// these settings.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DepositError::config(format!("invalid settings: {e}")))
    }

    /// Load settings from a file, then apply environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DepositError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let mut settings = Self::from_toml_str(&content)?;
        settings.apply_env();
        Ok(settings)
    }

    /// Defaults with environment overrides applied
    #[must_use]
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        settings.apply_env();
        settings
    }

    fn apply_env(&mut self) {
        if let Ok(dir) = std::env::var(DROPDOWN_DIR_ENV) {
            if !dir.is_empty() {
                tracing::debug!(dir = %dir, "dropdown directory overridden from environment");
                self.dropdown_dir = PathBuf::from(dir);
            }
        }
    }
}
