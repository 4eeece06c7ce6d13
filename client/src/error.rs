//! Errors reported by the deposit API

use thiserror::Error;

use crate::model::DepositId;

/// Failure of a deposit API call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server answered with an error
    #[error("{status} {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Status text or body
        message: String,
    },

    /// The deposit does not exist
    #[error("deposit {0} not found")]
    NotFound(DepositId),

    /// The server could not be reached
    #[error("{0}")]
    Network(String),
}

/// Result alias for deposit API calls
pub type Result<T> = std::result::Result<T, ApiError>;
