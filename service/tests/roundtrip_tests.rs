//! Convert/deconvert round trips over complete metadata documents

mod helpers;

use chrono::{DateTime, TimeZone, Utc};
use deposit_core::{DepositError, ExternalMetadata, FieldPath, form::FormMetadata};
use deposit_service::{
    DeconvertMode, metadata_converter, metadata_deconverter, metadata_deconverter_at,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};

const SUBMITTED_AT: &str = "2018-05-25T12:30:00.000Z";

fn submitted_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2018, 5, 25, 12, 30, 0).unwrap()
}

fn roundtrip(input: &ExternalMetadata, mode: DeconvertMode) -> ExternalMetadata {
    let lists = helpers::dropdown_lists();
    let converted = metadata_converter(input, &lists).expect("fixture converts");
    assert!(converted.is_clean(), "unexpected issues: {:?}", converted.issues);
    metadata_deconverter_at(&converted.form, &lists, mode, submitted_at()).expect("fixture deconverts")
}

fn with_mandatory_defaults(mut expected: Value, dates: Vec<Value>) -> Value {
    let object = expected.as_object_mut().expect("fixture is an object");
    object.insert("alternativeIdentifiers".into(), json!([{"scheme": "id-type:DOI"}]));
    object.insert(
        "relations".into(),
        json!([
            {"qualifier": "dcterms:relation", "scheme": "id-type:DOI"},
            {"qualifier": "dcterms:relation"},
        ]),
    );
    let mut all_dates = dates;
    all_dates.push(json!({"qualifier": "dcterms:date", "scheme": "dcterms:W3CDTF"}));
    all_dates.push(json!({"qualifier": "dcterms:date"}));
    object.insert("dates".into(), Value::Array(all_dates));
    expected
}

#[test]
fn test_allfields_survives_submit() {
    let input = helpers::external_fixture("allfields");
    let deconverted = roundtrip(&input, DeconvertMode::Submit);

    assert_eq!(deconverted, input);
    assert_eq!(roundtrip(&deconverted, DeconvertMode::Submit), deconverted);
}

#[test]
fn test_allfields_survives_save() {
    let input = helpers::external_fixture("allfields");
    let deconverted = roundtrip(&input, DeconvertMode::Save);

    assert_eq!(deconverted, input);
    assert_eq!(roundtrip(&deconverted, DeconvertMode::Save), deconverted);
}

#[test]
fn test_mandatory_only_gains_defaults() {
    let raw = helpers::external_json("mandatory_only");
    let dates = raw["dates"].as_array().cloned().unwrap_or_default();
    let expected = with_mandatory_defaults(raw.clone(), dates);

    for mode in [DeconvertMode::Submit, DeconvertMode::Save] {
        let input = helpers::external_fixture("mandatory_only");
        let deconverted = roundtrip(&input, mode);

        assert_eq!(serde_json::to_value(&deconverted).unwrap(), expected);
        assert_eq!(roundtrip(&deconverted, mode), deconverted);
    }
}

#[test]
fn test_new_metadata_gains_defaults_on_save() {
    let raw = helpers::external_json("new_metadata");
    let mut expected = with_mandatory_defaults(raw, Vec::new());
    expected["accessRights"] = json!("OPEN_ACCESS");

    let input = helpers::external_fixture("new_metadata");
    let deconverted = roundtrip(&input, DeconvertMode::Save);

    assert_eq!(serde_json::to_value(&deconverted).unwrap(), expected);
    assert_eq!(roundtrip(&deconverted, DeconvertMode::Save), deconverted);
}

#[test]
fn test_new_metadata_becomes_available_on_submit() {
    let raw = helpers::external_json("new_metadata");
    let available = json!({
        "qualifier": "dcterms:available",
        "scheme": "dcterms:W3CDTF",
        "value": SUBMITTED_AT,
    });
    let mut expected = with_mandatory_defaults(raw, vec![available]);
    expected["accessRights"] = json!("OPEN_ACCESS");

    let input = helpers::external_fixture("new_metadata");
    let deconverted = roundtrip(&input, DeconvertMode::Submit);

    assert_eq!(serde_json::to_value(&deconverted).unwrap(), expected);
    assert_eq!(roundtrip(&deconverted, DeconvertMode::Submit), deconverted);
}

#[test]
fn test_new_metadata_with_available_date() {
    let mut raw = helpers::external_json("new_metadata");
    let available = json!({
        "qualifier": "dcterms:available",
        "scheme": "dcterms:W3CDTF",
        "value": "2018-05-25",
    });
    raw["dates"] = json!([available.clone()]);
    let input: ExternalMetadata = serde_json::from_value(raw.clone()).unwrap();

    let mut expected = with_mandatory_defaults(raw, vec![available]);
    expected["accessRights"] = json!("OPEN_ACCESS");

    let deconverted = roundtrip(&input, DeconvertMode::Submit);
    assert_eq!(serde_json::to_value(&deconverted).unwrap(), expected);
}

#[test]
fn test_allfields_form_layout() {
    let lists = helpers::dropdown_lists();
    let input = helpers::external_fixture("allfields");
    let form: FormMetadata = metadata_converter(&input, &lists).unwrap().into_form();

    assert_eq!(form.contributors.len(), 2);
    assert_eq!(form.rights_holders.len(), 2);
    assert_eq!(form.rights_holders[1].ids[0].value, "0000-0001-2345-6789");
    assert_eq!(form.date_created, "2018-03-19");
    assert_eq!(form.date_available, "2018-03-22");
    assert_eq!(form.dates_iso8601.len(), 2);
    assert_eq!(form.dates.len(), 2);
    assert_eq!(form.subjects_abr_complex, vec!["DEPO".to_string()]);
    assert_eq!(form.languages_of_files_iso639, vec!["nld".to_string(), "deu".to_string()]);
    assert_eq!(form.languages_of_files, vec!["Flakkees".to_string()]);
    assert_eq!(form.formats_media_type.len(), 2);
    assert_eq!(form.related_identifiers.len(), 2);
    assert_eq!(form.relations.len(), 3);
    assert_eq!(form.license, "http://creativecommons.org/publicdomain/zero/1.0");
}

#[test]
fn test_form_document_serializes_in_camel_case() {
    let lists = helpers::dropdown_lists();
    let input = helpers::external_fixture("mandatory_only");
    let form = metadata_converter(&input, &lists).unwrap().form;
    let value = serde_json::to_value(&form).unwrap();

    assert_eq!(value["dateCreated"], json!("2018-03-19"));
    assert_eq!(value["alternativeIdentifiers"], json!([{"scheme": "id-type:DOI", "value": ""}]));

    let back: FormMetadata = serde_json::from_value(value).unwrap();
    assert_eq!(back, form);
}

#[test]
fn test_unknown_role_is_reported_in_place() {
    let lists = helpers::dropdown_lists();
    let mut raw = helpers::external_json("allfields");
    raw["contributors"][1]["role"]["key"] = json!("Astronaut");
    let input: ExternalMetadata = serde_json::from_value(raw).unwrap();

    let converted = metadata_converter(&input, &lists).unwrap();
    let path: FieldPath = "contributors[1].role".parse().unwrap();
    assert_eq!(
        converted.issues.message_at(&path),
        Some("Error in metadata: no such contributor role: 'Astronaut'")
    );
    assert_eq!(converted.form.contributors[1].role, "Astronaut");

    let err = metadata_deconverter(&converted.form, &lists, DeconvertMode::Submit).unwrap_err();
    assert!(err.is_metadata_error());
}

#[test]
fn test_creator_with_rights_holder_role_survives() {
    let mut raw = helpers::external_json("allfields");
    raw["creators"][0]["role"] = json!({
        "scheme": "datacite:contributorType",
        "key": "RightsHolder",
        "value": "Rightsholder",
    });
    let input: ExternalMetadata = serde_json::from_value(raw).unwrap();

    let form = metadata_converter(&input, &helpers::dropdown_lists()).unwrap().form;
    assert_eq!(form.creators[0].role, "RightsHolder");

    for mode in [DeconvertMode::Submit, DeconvertMode::Save] {
        assert_eq!(roundtrip(&input, mode), input);
    }
}

#[test]
fn test_deconvert_rejects_unlisted_keys() {
    let lists = helpers::dropdown_lists();
    let mut form = metadata_converter(&helpers::external_fixture("allfields"), &lists)
        .unwrap()
        .form;
    form.alternative_identifiers[0].scheme = "id-type:BOGUS".to_string();

    let err = metadata_deconverter(&form, &lists, DeconvertMode::Save).unwrap_err();
    assert!(matches!(
        &err,
        DepositError::UnknownKey { key, .. } if key == "id-type:BOGUS"
    ));

    let mut form = metadata_converter(&helpers::external_fixture("allfields"), &lists)
        .unwrap()
        .form;
    form.dates[0].qualifier = "dcterms:bogus".to_string();
    let err = metadata_deconverter(&form, &lists, DeconvertMode::Submit).unwrap_err();
    assert_eq!(err.to_string(), "Error in metadata: no such date qualifier: 'dcterms:bogus'");
}

proptest! {
    #[test]
    fn prop_free_text_groups_survive(
        titles in prop::collection::vec("[a-zA-Z0-9 ]{1,20}", 1..5),
        sources in prop::collection::vec("[a-z]{1,12}", 0..4),
    ) {
        let lists = helpers::dropdown_lists();
        let mut input = helpers::external_fixture("allfields");
        input.titles = titles;
        input.sources = sources;

        let form = metadata_converter(&input, &lists).unwrap().form;
        let back = metadata_deconverter(&form, &lists, DeconvertMode::Save).unwrap();
        prop_assert_eq!(back, input);
    }
}
