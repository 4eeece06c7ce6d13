//! Core types for dataset deposit metadata
//!
//! This crate holds the two document shapes the deposit application works
//! with, the dropdown lists that resolve their controlled vocabularies, and
//! the error tree produced by form validation:
//!
//! - [`external::ExternalMetadata`]: the document exchanged with the API
//! - [`form::FormMetadata`]: the flattened document edited in the form
//! - [`dropdown::DropdownLists`]: controlled-vocabulary reference data
//! - [`error_tree::ErrorTree`]: per-field validation messages
//!
//! Conversion between the two documents lives in `deposit_service`.

#![warn(missing_docs)]

pub mod dropdown;
pub mod error;
pub mod error_tree;
pub mod external;
pub mod form;
pub mod settings;
pub mod user;

pub use dropdown::{DropdownList, DropdownListEntry, DropdownLists, ListState};
pub use error::{DepositError, Result};
pub use error_tree::{ErrorTree, FieldPath, PathSegment};
pub use external::ExternalMetadata;
pub use form::FormMetadata;
pub use settings::DepositSettings;
pub use user::{UserDetails, UserInput, user_converter};
