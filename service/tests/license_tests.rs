//! License converter and deconverter

use deposit_core::{DepositError, DropdownList, DropdownListEntry};
use deposit_service::{license_converter, license_deconverter};
use pretty_assertions::assert_eq;

fn licenses() -> DropdownList {
    DropdownList::fetched(vec![
        DropdownListEntry::new("http://creativecommons.org/publicdomain/zero/1.0", "CC0-1.0"),
        DropdownListEntry::new("deu", "German"),
    ])
}

#[test]
fn test_converter_keeps_known_license_key() {
    let licenses = licenses();
    let converted = license_converter(&licenses)("http://creativecommons.org/publicdomain/zero/1.0");
    assert_eq!(
        converted.unwrap(),
        "http://creativecommons.org/publicdomain/zero/1.0"
    );
}

#[test]
fn test_converter_rejects_unknown_license() {
    let licenses = licenses();
    let err = license_converter(&licenses)("invalid license").unwrap_err();
    assert!(matches!(err, DepositError::UnknownLicense(ref key) if key == "invalid license"));
    assert_eq!(
        err.to_string(),
        "Error in metadata: no such license: 'invalid license'"
    );
}

#[test]
fn test_deconverter_keeps_known_license_key() {
    let licenses = licenses();
    let deconverted =
        license_deconverter(&licenses)("http://creativecommons.org/publicdomain/zero/1.0");
    assert_eq!(
        deconverted.unwrap(),
        "http://creativecommons.org/publicdomain/zero/1.0"
    );
}

#[test]
fn test_deconverter_rejects_unknown_license() {
    let licenses = licenses();
    let err = license_deconverter(&licenses)("invalid license").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Error in metadata: no such license: 'invalid license'"
    );
}

#[test]
fn test_unfetched_list_knows_no_license() {
    let licenses = DropdownList::default();
    assert!(license_converter(&licenses)("deu").is_err());
}
