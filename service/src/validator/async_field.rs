//! Validation run when a form field loses focus

use std::sync::Arc;

use deposit_core::{DropdownLists, ErrorTree, FieldPath, FormMetadata, form::FormContributor};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use super::field_state::{FieldState, FieldStates};
use super::orcid::check_identifier;
use crate::http::HttpClient;

static BLURRED_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(contributors|rightsHolders)\[(\d+)]\.ids\[(\d+)]\.(scheme|value)$")
        .expect("blurred identifier pattern is valid")
});

/// Message in the tree returned when no blurred field is given
pub const MISSING_FIELD_MESSAGE: &str = "invalid value!!!";

/// What the caller knows besides the form values
#[derive(Debug, Clone, Copy)]
pub struct ValidationProps<'a> {
    /// Errors from earlier async validations
    pub async_errors: &'a ErrorTree,
    /// Reference lists; only `contributorIds` is consulted
    pub dropdown_lists: &'a DropdownLists,
}

/// Why a validation did not resolve cleanly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationRejection {
    /// Called without a blurred field
    #[error("async validation called without a blurred field")]
    MissingField(ErrorTree),
    /// The merged error tree holds at least one message
    #[error("form has async validation errors")]
    Errors(ErrorTree),
}

impl ValidationRejection {
    /// The rejecting error tree
    #[must_use]
    pub fn tree(&self) -> &ErrorTree {
        match self {
            Self::MissingField(tree) | Self::Errors(tree) => tree,
        }
    }

    /// Take the rejecting error tree
    #[must_use]
    pub fn into_tree(self) -> ErrorTree {
        match self {
            Self::MissingField(tree) | Self::Errors(tree) => tree,
        }
    }
}

/// The fixed tree reported for a missing blurred field
#[must_use]
pub fn missing_field_tree() -> ErrorTree {
    ErrorTree::node([(
        "contributors",
        ErrorTree::List(vec![ErrorTree::node([(
            "ids",
            ErrorTree::node([("value", ErrorTree::message(MISSING_FIELD_MESSAGE))]),
        )])]),
    )])
}

/// An identifier field addressed by a blurred field name
#[derive(Debug, Clone, PartialEq, Eq)]
struct IdentifierField {
    group: &'static str,
    index: usize,
    id_index: usize,
}

impl IdentifierField {
    fn parse(field: &str) -> Option<Self> {
        let captures = BLURRED_IDENTIFIER.captures(field)?;
        let group = match &captures[1] {
            "contributors" => "contributors",
            _ => "rightsHolders",
        };
        Some(Self {
            group,
            index: captures[2].parse().ok()?,
            id_index: captures[3].parse().ok()?,
        })
    }

    fn contributors<'a>(&self, values: &'a FormMetadata) -> &'a [FormContributor] {
        if self.group == "contributors" {
            &values.contributors
        } else {
            &values.rights_holders
        }
    }

    fn path(&self) -> FieldPath {
        FieldPath::new(vec![
            self.group.into(),
            self.index.into(),
            "ids".into(),
            self.id_index.into(),
        ])
    }
}

/// Validates identifier fields against remote lookup services
///
/// Invocations are independent: each reads the previous tree from its props
/// and returns a new one, so any number may run at once.
pub struct AsyncFieldValidator {
    client: Arc<dyn HttpClient>,
    states: FieldStates,
}

impl AsyncFieldValidator {
    /// Create a validator using `client` for lookups
    pub fn new(client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            states: FieldStates::new(),
        }
    }

    /// State of an identifier, addressed as `contributors[i].ids[j]`
    #[must_use]
    pub fn field_state(&self, identifier: &str) -> FieldState {
        self.states.get(identifier)
    }

    /// All identifier states seen so far
    #[must_use]
    pub fn field_states(&self) -> &FieldStates {
        &self.states
    }

    /// Validate after `blurred_field` lost focus
    ///
    /// Only contributor and rights holder identifiers are checked; for any
    /// other field the previous errors come back unchanged. The result of a
    /// check replaces whatever the previous tree held for that identifier
    /// and leaves everything else alone.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationRejection::MissingField`] when `blurred_field` is
    /// absent or empty, and [`ValidationRejection::Errors`] when the
    /// resulting tree is not empty.
    pub async fn validate(
        &self,
        values: &FormMetadata,
        props: ValidationProps<'_>,
        blurred_field: Option<&str>,
    ) -> Result<ErrorTree, ValidationRejection> {
        let Some(field) = blurred_field.filter(|field| !field.is_empty()) else {
            warn!("async validation invoked without a blurred field");
            return Err(ValidationRejection::MissingField(missing_field_tree()));
        };

        let previous = props.async_errors;
        let Some(target) = IdentifierField::parse(field) else {
            debug!(field, "no async validation for field");
            return resolve(previous.clone());
        };

        let Some(id) = target
            .contributors(values)
            .get(target.index)
            .and_then(|contributor| contributor.ids.get(target.id_index))
        else {
            return resolve(previous.clone());
        };
        if id.scheme.is_empty() || id.value.is_empty() {
            return resolve(previous.clone());
        }

        let path = target.path();
        let key = path.to_string();
        let ticket = self.states.begin(&key);

        let check = check_identifier(
            self.client.as_ref(),
            props.dropdown_lists.contributor_ids.entries(),
            &id.scheme,
            &id.value,
        )
        .await;
        let state = check.state();
        if self.states.finish(&key, ticket, state) {
            debug!(field = %key, ?state, "identifier checked");
        } else {
            debug!(field = %key, ?state, "identifier checked again meanwhile; outcome not recorded");
        }

        resolve(previous.with(&path, check.error_tree()))
    }
}

fn resolve(errors: ErrorTree) -> Result<ErrorTree, ValidationRejection> {
    if errors.is_empty() {
        Ok(errors)
    } else {
        Err(ValidationRejection::Errors(errors))
    }
}
