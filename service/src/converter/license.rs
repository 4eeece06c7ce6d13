//! License conversion
//!
//! Licenses are stored by their canonical identifier, which is also the key
//! of the license dropdown list, so both directions only check membership.

use deposit_core::{DepositError, DropdownList, Result};

fn canonical_license(licenses: &DropdownList, key: &str) -> Result<String> {
    licenses
        .find(key)
        .map(|entry| entry.key.clone())
        .ok_or_else(|| DepositError::UnknownLicense(key.to_string()))
}

/// Converter from an external license to the form's license key
///
/// # Errors
///
/// The returned function fails with `DepositError::UnknownLicense` when the
/// key is not in `licenses`.
pub fn license_converter(licenses: &DropdownList) -> impl Fn(&str) -> Result<String> + '_ {
    move |key| canonical_license(licenses, key)
}

/// Converter from the form's license key back to the external license
///
/// # Errors
///
/// The returned function fails with `DepositError::UnknownLicense` when the
/// key is not in `licenses`.
pub fn license_deconverter(licenses: &DropdownList) -> impl Fn(&str) -> Result<String> + '_ {
    move |key| canonical_license(licenses, key)
}
