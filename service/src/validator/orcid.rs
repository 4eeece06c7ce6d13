//! Remote existence check for ORCID identifiers

use deposit_core::{DropdownListEntry, ErrorTree, external::vocab};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::FieldState;
use crate::http::HttpClient;

/// Message placed on an identifier the lookup service does not know
pub const UNKNOWN_ORCID: &str = "Unknown ORCID identifier";

/// Outcome of checking one identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentifierCheck {
    /// The scheme has no remote lookup
    NotChecked,
    /// The lookup service knows the identifier
    Found,
    /// The lookup service reported zero results
    NotFound,
    /// The lookup failed
    Unverifiable(String),
}

impl IdentifierCheck {
    /// Field state this outcome settles into
    #[must_use]
    pub fn state(&self) -> FieldState {
        match self {
            Self::NotChecked | Self::Found => FieldState::Valid,
            Self::NotFound => FieldState::Invalid,
            Self::Unverifiable(_) => FieldState::Unverifiable,
        }
    }

    /// Errors for the identifier's `{scheme, value}` subtree
    #[must_use]
    pub fn error_tree(&self) -> ErrorTree {
        match self {
            Self::NotFound => ErrorTree::node([("value", ErrorTree::message(UNKNOWN_ORCID))]),
            _ => ErrorTree::Empty,
        }
    }
}

/// Lookup URL for an identifier, when its scheme supports remote checks
#[must_use]
pub fn lookup_url(choices: &[DropdownListEntry], scheme: &str, value: &str) -> Option<String> {
    let entry = choices.iter().find(|entry| entry.key == scheme)?;
    if entry.key != vocab::ID_ORCID {
        return None;
    }
    entry
        .base_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| url.replacen("%s", value, 1))
}

/// `num-found` as a number, whether sent as a number or a numeric string
fn num_found(body: &Value) -> Option<f64> {
    match body.get("num-found")? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Check an identifier against the lookup service named by its scheme
///
/// Never fails: an unreachable service or an unreadable answer gives
/// [`IdentifierCheck::Unverifiable`].
pub async fn check_identifier(
    client: &dyn HttpClient,
    choices: &[DropdownListEntry],
    scheme: &str,
    value: &str,
) -> IdentifierCheck {
    let Some(url) = lookup_url(choices, scheme, value) else {
        return IdentifierCheck::NotChecked;
    };

    if let Err(e) = Url::parse(&url) {
        warn!(url = %url, error = %e, "ORCID lookup URL is malformed; not able to validate");
        return IdentifierCheck::Unverifiable(format!("invalid lookup url: {e}"));
    }

    let body = match client.get_json(&url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(url = %url, error = %e, "ORCID did not respond well; not able to validate");
            return IdentifierCheck::Unverifiable(e.to_string());
        }
    };

    match num_found(&body) {
        Some(count) if count == 0.0 => {
            debug!(url = %url, "ORCID identifier not found");
            IdentifierCheck::NotFound
        }
        Some(_) => IdentifierCheck::Found,
        None => {
            warn!(url = %url, "ORCID response has no usable num-found");
            IdentifierCheck::Unverifiable("missing num-found".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn choices() -> Vec<DropdownListEntry> {
        vec![
            DropdownListEntry::new(vocab::ID_ORCID, "ORCID")
                .with_base_url("https://pub.orcid.org/v3.0/search/?q=orcid:%s"),
            DropdownListEntry::new("id-type:ISNI", "ISNI").with_base_url("http://isni.org/%s"),
        ]
    }

    #[test]
    fn test_lookup_url_only_for_orcid() {
        assert_eq!(
            lookup_url(&choices(), vocab::ID_ORCID, "0000-0002-1825-0097").as_deref(),
            Some("https://pub.orcid.org/v3.0/search/?q=orcid:0000-0002-1825-0097")
        );
        assert_eq!(lookup_url(&choices(), "id-type:ISNI", "123"), None);
        assert_eq!(lookup_url(&choices(), "id-type:DAI", "123"), None);
        assert_eq!(lookup_url(&[], vocab::ID_ORCID, "123"), None);
    }

    #[test]
    fn test_num_found_accepts_numbers_and_strings() {
        assert_eq!(num_found(&json!({"num-found": 0})), Some(0.0));
        assert_eq!(num_found(&json!({"num-found": "1"})), Some(1.0));
        assert_eq!(num_found(&json!({"num-found": " 0 "})), Some(0.0));
        assert_eq!(num_found(&json!({"result": []})), None);
    }

    #[test]
    fn test_not_found_tree() {
        assert_eq!(
            serde_json::to_value(IdentifierCheck::NotFound.error_tree()).unwrap(),
            json!({"value": UNKNOWN_ORCID})
        );
        assert!(IdentifierCheck::Found.error_tree().is_empty());
        assert!(IdentifierCheck::Unverifiable("down".into()).state().is_valid());
    }
}
