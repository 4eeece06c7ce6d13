//! Deposit metadata services
//!
//! Conversion between the external and form metadata documents, the
//! asynchronous identifier validator, and loading of dropdown lists.

#![warn(missing_docs)]

pub mod converter;
pub mod http;
pub mod loader;
pub mod validator;

pub use converter::{
    ConvertedMetadata, DeconvertMode, license_converter, license_deconverter, metadata_converter,
    metadata_deconverter, metadata_deconverter_at,
};
pub use http::{HttpClient, ReqwestHttpClient};
pub use loader::DropdownListLoader;
pub use validator::{
    AsyncFieldValidator, FieldState, IdentifierCheck, ValidationProps, ValidationRejection,
};
