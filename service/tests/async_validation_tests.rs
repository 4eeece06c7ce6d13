//! Blur-triggered identifier validation

mod helpers;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use deposit_core::{
    DepositError, DropdownList, DropdownLists, ErrorTree, FieldPath, FormMetadata, Result,
    form::{FormContributor, FormSchemedValue},
};
use deposit_service::validator::{UNKNOWN_ORCID, missing_field_tree};
use deposit_service::{
    AsyncFieldValidator, FieldState, HttpClient, ValidationProps, ValidationRejection,
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

const UNKNOWN: &str = "0000-0000-0000-0000";
const KNOWN: &str = "0000-0002-1825-0097";
const OFFLINE: &str = "0000-0009-9999-9999";

/// Answers ORCID searches from a fixed table
struct MockOrcid {
    delays: HashMap<&'static str, Duration>,
    requests: Mutex<Vec<String>>,
}

impl MockOrcid {
    fn new() -> Self {
        Self {
            delays: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn with_delay(mut self, id: &'static str, delay: Duration) -> Self {
        self.delays.insert(id, delay);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpClient for MockOrcid {
    async fn get_json(&self, url: &str) -> Result<Value> {
        self.requests.lock().unwrap().push(url.to_string());
        let id = url.rsplit(':').next().unwrap_or_default();
        if let Some(delay) = self.delays.get(id) {
            tokio::time::sleep(*delay).await;
        }
        match id {
            UNKNOWN => Ok(json!({"num-found": 0, "result": null})),
            OFFLINE => Err(DepositError::http("connection refused")),
            "0000-0001-0000-000X" => Ok(json!({"num-found": "0"})),
            _ => Ok(json!({"num-found": 1, "result": [{"orcid-identifier": {"path": id}}]})),
        }
    }
}

fn contributor(ids: &[(&str, &str)]) -> FormContributor {
    FormContributor {
        surname: "Vink".to_string(),
        ids: ids
            .iter()
            .map(|(scheme, value)| FormSchemedValue::new(*scheme, *value))
            .collect(),
        ..Default::default()
    }
}

fn orcid(value: &str) -> FormContributor {
    contributor(&[("id-type:ORCID", value)])
}

fn path(p: &str) -> FieldPath {
    p.parse().unwrap()
}

fn build_validator(client: MockOrcid) -> (Arc<MockOrcid>, AsyncFieldValidator) {
    let client = Arc::new(client);
    let validator = AsyncFieldValidator::new(client.clone());
    (client, validator)
}

#[tokio::test]
async fn test_unknown_orcid_is_reported_at_exact_path() {
    let lists = helpers::dropdown_lists();
    let values = FormMetadata {
        contributors: vec![orcid(KNOWN), orcid(UNKNOWN), orcid(KNOWN)],
        ..Default::default()
    };
    let previous = ErrorTree::Empty
        .with(&path("contributors[0].surname"), ErrorTree::message("required"))
        .with(&path("contributors[2].ids[0].value"), ErrorTree::message("stale"));
    let (client, validator) = build_validator(MockOrcid::new());

    let rejection = validator
        .validate(
            &values,
            ValidationProps {
                async_errors: &previous,
                dropdown_lists: &lists,
            },
            Some("contributors[1].ids[0].value"),
        )
        .await
        .unwrap_err();

    let ValidationRejection::Errors(tree) = rejection else {
        panic!("expected an error tree");
    };
    assert_eq!(tree.message_at(&path("contributors[1].ids[0].value")), Some(UNKNOWN_ORCID));
    assert_eq!(tree.get(&path("contributors[0]")), previous.get(&path("contributors[0]")));
    assert_eq!(tree.get(&path("contributors[2]")), previous.get(&path("contributors[2]")));
    assert_eq!(
        client.requests(),
        vec![format!("https://pub.orcid.org/v2.1/search/?q=orcid:{UNKNOWN}")]
    );
    assert_eq!(validator.field_state("contributors[1].ids[0]"), FieldState::Invalid);
}

#[tokio::test]
async fn test_known_orcid_clears_previous_error() {
    let lists = helpers::dropdown_lists();
    let values = FormMetadata {
        rights_holders: vec![orcid(KNOWN)],
        ..Default::default()
    };
    let previous =
        ErrorTree::Empty.with(&path("rightsHolders[0].ids[0].value"), ErrorTree::message(UNKNOWN_ORCID));
    let (_, validator) = build_validator(MockOrcid::new());

    let tree = validator
        .validate(
            &values,
            ValidationProps {
                async_errors: &previous,
                dropdown_lists: &lists,
            },
            Some("rightsHolders[0].ids[0].scheme"),
        )
        .await
        .unwrap();

    assert_eq!(tree, ErrorTree::Empty);
    assert_eq!(validator.field_state("rightsHolders[0].ids[0]"), FieldState::Valid);
}

#[tokio::test]
async fn test_numeric_string_count_is_understood() {
    let lists = helpers::dropdown_lists();
    let values = FormMetadata {
        contributors: vec![orcid("0000-0001-0000-000X")],
        ..Default::default()
    };
    let (_, validator) = build_validator(MockOrcid::new());

    let rejection = validator
        .validate(
            &values,
            ValidationProps {
                async_errors: &ErrorTree::Empty,
                dropdown_lists: &lists,
            },
            Some("contributors[0].ids[0].value"),
        )
        .await
        .unwrap_err();

    assert_eq!(
        rejection.tree().message_at(&path("contributors[0].ids[0].value")),
        Some(UNKNOWN_ORCID)
    );
}

#[tokio::test]
async fn test_missing_blurred_field_always_rejects() {
    let lists = helpers::dropdown_lists();
    let values = FormMetadata {
        contributors: vec![orcid(KNOWN)],
        ..Default::default()
    };
    let (client, validator) = build_validator(MockOrcid::new());

    for field in [None, Some("")] {
        let rejection = validator
            .validate(
                &values,
                ValidationProps {
                    async_errors: &ErrorTree::Empty,
                    dropdown_lists: &lists,
                },
                field,
            )
            .await
            .unwrap_err();
        assert_eq!(rejection, ValidationRejection::MissingField(missing_field_tree()));
    }
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn test_network_failure_is_fail_open() {
    let lists = helpers::dropdown_lists();
    let values = FormMetadata {
        contributors: vec![orcid(OFFLINE)],
        ..Default::default()
    };
    let (_, validator) = build_validator(MockOrcid::new());

    let tree = validator
        .validate(
            &values,
            ValidationProps {
                async_errors: &ErrorTree::Empty,
                dropdown_lists: &lists,
            },
            Some("contributors[0].ids[0].value"),
        )
        .await
        .unwrap();

    assert_eq!(tree, ErrorTree::Empty);
    let state = validator.field_state("contributors[0].ids[0]");
    assert_eq!(state, FieldState::Unverifiable);
    assert!(state.is_valid());
}

#[tokio::test]
async fn test_other_fields_return_previous_errors() {
    let lists = helpers::dropdown_lists();
    let values = FormMetadata {
        contributors: vec![orcid(UNKNOWN)],
        ..Default::default()
    };
    let previous = ErrorTree::Empty.with(&path("titles[0]"), ErrorTree::message("required"));
    let (client, validator) = build_validator(MockOrcid::new());

    let props = ValidationProps {
        async_errors: &previous,
        dropdown_lists: &lists,
    };
    let rejection = validator
        .validate(&values, props, Some("contributors[0].surname"))
        .await
        .unwrap_err();
    assert_eq!(rejection.into_tree(), previous);

    let tree = validator
        .validate(
            &values,
            ValidationProps {
                async_errors: &ErrorTree::Empty,
                dropdown_lists: &lists,
            },
            Some("creators[0].ids[0].value"),
        )
        .await
        .unwrap();
    assert!(tree.is_empty());
    assert!(client.requests().is_empty());
}

#[tokio::test]
async fn test_unchecked_when_identifier_incomplete_or_unlisted() {
    let mut lists = helpers::dropdown_lists();
    let values = FormMetadata {
        contributors: vec![
            contributor(&[("id-type:ORCID", "")]),
            contributor(&[("id-type:DAI", "93313935x")]),
            orcid(UNKNOWN),
        ],
        ..Default::default()
    };
    let (client, validator) = build_validator(MockOrcid::new());

    for field in [
        "contributors[0].ids[0].value",
        "contributors[1].ids[0].value",
        "contributors[5].ids[0].value",
    ] {
        let result = validator
            .validate(
                &values,
                ValidationProps {
                    async_errors: &ErrorTree::Empty,
                    dropdown_lists: &lists,
                },
                Some(field),
            )
            .await;
        assert_eq!(result, Ok(ErrorTree::Empty));
    }

    lists.contributor_ids = DropdownList::failed("not reachable");
    let result = validator
        .validate(
            &values,
            ValidationProps {
                async_errors: &ErrorTree::Empty,
                dropdown_lists: &lists,
            },
            Some("contributors[2].ids[0].value"),
        )
        .await;
    assert_eq!(result, Ok(ErrorTree::Empty));
    assert!(client.requests().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_validations_do_not_erase_each_other() {
    let lists: DropdownLists = helpers::dropdown_lists();
    let values = FormMetadata {
        contributors: vec![orcid(UNKNOWN), orcid("0000-0001-0000-000X")],
        ..Default::default()
    };
    let (_, validator) =
        build_validator(MockOrcid::new().with_delay(UNKNOWN, Duration::from_millis(200)));
    let previous = ErrorTree::Empty;
    let props = ValidationProps {
        async_errors: &previous,
        dropdown_lists: &lists,
    };

    let (slow, fast) = tokio::join!(
        validator.validate(&values, props, Some("contributors[0].ids[0].value")),
        validator.validate(&values, props, Some("contributors[1].ids[0].value")),
    );

    // each result carries only its own field; the caller merges them
    let slow = slow.unwrap_err().into_tree();
    let fast = fast.unwrap_err().into_tree();
    let merged = fast.overlay(&slow);

    assert_eq!(merged.message_at(&path("contributors[0].ids[0].value")), Some(UNKNOWN_ORCID));
    assert_eq!(merged.message_at(&path("contributors[1].ids[0].value")), Some(UNKNOWN_ORCID));
    assert_eq!(validator.field_states().snapshot().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_stale_check_does_not_overwrite_newer_state() {
    let lists = helpers::dropdown_lists();
    let before = FormMetadata {
        contributors: vec![orcid(UNKNOWN)],
        ..Default::default()
    };
    let after = FormMetadata {
        contributors: vec![orcid(KNOWN)],
        ..Default::default()
    };
    let (_, validator) =
        build_validator(MockOrcid::new().with_delay(UNKNOWN, Duration::from_millis(200)));
    let previous = ErrorTree::Empty;
    let props = ValidationProps {
        async_errors: &previous,
        dropdown_lists: &lists,
    };

    let (first, second) = tokio::join!(
        validator.validate(&before, props, Some("contributors[0].ids[0].value")),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            validator
                .validate(&after, props, Some("contributors[0].ids[0].value"))
                .await
        },
    );

    assert!(first.is_err());
    assert_eq!(second, Ok(ErrorTree::Empty));
    assert_eq!(validator.field_state("contributors[0].ids[0]"), FieldState::Valid);
}
