//! Error types for deposit metadata handling
//!
//! Every fallible operation in the workspace reports a [`DepositError`].
//! Problems found in a metadata document itself render with the
//! `Error in metadata:` prefix so callers can show them verbatim.

use thiserror::Error;

/// Result alias used throughout the deposit crates
pub type Result<T> = std::result::Result<T, DepositError>;

/// Main error type for deposit metadata operations
#[derive(Debug, Error)]
pub enum DepositError {
    /// License key not present in the license dropdown list
    #[error("Error in metadata: no such license: '{0}'")]
    UnknownLicense(String),

    /// Controlled-vocabulary key not present in its dropdown list
    #[error("Error in metadata: no such {list}: '{key}'")]
    UnknownKey {
        /// Name of the list the key was looked up in
        list: String,
        /// The offending key
        key: String,
    },

    /// Structural problem in a metadata document
    #[error("Error in metadata: {0}")]
    Metadata(String),

    /// Malformed field path
    #[error("invalid field path '{path}': {reason}")]
    FieldPath {
        /// The path as given
        path: String,
        /// What is wrong with it
        reason: String,
    },

    /// Configuration could not be read or is inconsistent
    #[error("configuration error: {0}")]
    Config(String),

    /// Remote request failed
    #[error("http error: {0}")]
    Http(String),

    /// I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DepositError {
    /// Create an unknown-key error for the named list
    pub fn unknown_key(list: impl Into<String>, key: impl Into<String>) -> Self {
        Self::UnknownKey {
            list: list.into(),
            key: key.into(),
        }
    }

    /// Create a metadata error
    pub fn metadata(message: impl Into<String>) -> Self {
        Self::Metadata(message.into())
    }

    /// Create a field path error
    pub fn field_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::FieldPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an HTTP error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http(message.into())
    }

    /// Whether the error describes a problem in the metadata document
    #[must_use]
    pub fn is_metadata_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownLicense(_) | Self::UnknownKey { .. } | Self::Metadata(_)
        )
    }
}
