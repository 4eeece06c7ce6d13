//! JSON shape of the metadata documents and error trees
//!
//! These documents are exchanged with the deposit API and the editor, so
//! their field names and omission rules are part of the contract.

use deposit_core::external::{AccessRight, Contributor, PrivacySensitiveDataPresent, Relation};
use deposit_core::{
    ErrorTree, ExternalMetadata, FieldPath, FormMetadata, Result, UserInput, user_converter,
};
use pretty_assertions::assert_eq;
use serde_json::json;

/// Absent values are left out of the external document
#[test]
fn test_external_omits_absent_values() -> Result<()> {
    let metadata = ExternalMetadata {
        doi: Some("doi:10.5072/dans-x".to_string()),
        access_rights: Some(AccessRight::RequestPermission),
        privacy_sensitive_data_present: Some(PrivacySensitiveDataPresent::Unspecified),
        contributors: vec![Contributor {
            surname: Some("Vink".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };

    assert_eq!(
        serde_json::to_value(&metadata)?,
        json!({
            "doi": "doi:10.5072/dans-x",
            "contributors": [{"surname": "Vink"}],
            "accessRights": "REQUEST_PERMISSION",
            "privacySensitiveDataPresent": "unspecified",
        })
    );
    Ok(())
}

/// Unknown fields are ignored and missing ones default
#[test]
fn test_external_parses_partial_documents() -> Result<()> {
    let metadata: ExternalMetadata = serde_json::from_value(json!({
        "titles": ["title1"],
        "relations": [{"qualifier": "dcterms:hasPart", "url": "https://example.org"}],
        "somethingElse": true,
    }))?;

    assert_eq!(metadata.titles, vec!["title1".to_string()]);
    assert_eq!(
        metadata.relations,
        vec![Relation {
            qualifier: Some("dcterms:hasPart".to_string()),
            url: Some("https://example.org".to_string()),
            ..Default::default()
        }]
    );
    assert!(!metadata.relations[0].is_identifier());
    assert_eq!(metadata.access_rights, None);
    Ok(())
}

/// An empty form document parses with every field at its default
#[test]
fn test_form_parses_empty_document() -> Result<()> {
    let form: FormMetadata = serde_json::from_str("{}")?;
    assert_eq!(form, FormMetadata::default());
    assert_eq!(form.access_rights, AccessRight::OpenAccess);
    Ok(())
}

/// Error trees render in the shape of the form
#[test]
fn test_error_tree_json_shape() -> Result<()> {
    let orcid: FieldPath = "contributors[1].ids[0].value".parse()?;
    let title: FieldPath = "titles[0]".parse()?;
    let tree = ErrorTree::Empty
        .with(&orcid, ErrorTree::message("Unknown ORCID identifier"))
        .with(&title, ErrorTree::message("required"));

    assert_eq!(
        serde_json::to_value(&tree)?,
        json!({
            "contributors": [null, {"ids": [{"value": "Unknown ORCID identifier"}]}],
            "titles": ["required"],
        })
    );

    let parsed: ErrorTree = serde_json::from_value(serde_json::to_value(&tree)?)?;
    assert_eq!(parsed, tree);
    Ok(())
}

/// User details fill absent fields with empty strings
#[test]
fn test_user_converter_from_json() -> Result<()> {
    let input: UserInput = serde_json::from_value(json!({
        "username": "user001",
        "firstName": "First",
        "lastName": "Last",
        "email": "user@example.org",
    }))?;

    let user = user_converter(input);
    assert_eq!(user.username, "user001");
    assert_eq!(user.last_name, "Last");
    assert_eq!(user.prefix, "");
    assert_eq!(user.display_name, "");
    Ok(())
}
