//! Asynchronous form field validation
//!
//! When an identifier field of a contributor or rights holder loses focus,
//! the identifier is checked against the lookup service its scheme names.
//! Lookup failures never block the depositor: the field is marked
//! [`FieldState::Unverifiable`] and accepted.

mod async_field;
mod field_state;
mod orcid;

pub use async_field::{
    AsyncFieldValidator, MISSING_FIELD_MESSAGE, ValidationProps, ValidationRejection,
    missing_field_tree,
};
pub use field_state::{CheckTicket, FieldState, FieldStates};
pub use orcid::{IdentifierCheck, UNKNOWN_ORCID, check_identifier, lookup_url};
