//! Controlled-vocabulary helpers shared by the field converters

use deposit_core::{
    DepositError, DropdownList, DropdownListEntry, ErrorTree, FieldPath, Result,
    external::SchemedKeyValue,
};

/// Collects error-valued placeholders produced while converting
#[derive(Debug, Default)]
pub(crate) struct Issues {
    tree: ErrorTree,
}

impl Issues {
    /// Record an error at a form path
    pub(crate) fn record(&mut self, path: &FieldPath, error: &DepositError) {
        tracing::debug!(path = %path, error = %error, "unresolved controlled value");
        self.tree = self.tree.with(path, ErrorTree::message(error.to_string()));
    }

    /// Record an error unless `key` is in `list`
    pub(crate) fn check_key(&mut self, list: &DropdownList, label: &str, key: &str, path: &FieldPath) {
        if !key.is_empty() && !list.contains(key) {
            self.record(path, &DepositError::unknown_key(label, key));
        }
    }

    pub(crate) fn into_tree(self) -> ErrorTree {
        self.tree
    }
}

/// Resolve a key to its list entry
pub(crate) fn resolve<'a>(
    list: &'a DropdownList,
    label: &str,
    key: &str,
) -> Result<&'a DropdownListEntry> {
    list.find(key).ok_or_else(|| DepositError::unknown_key(label, key))
}

/// Build a controlled external value from a form key
pub(crate) fn controlled_value(
    list: &DropdownList,
    label: &str,
    scheme: &str,
    key: &str,
) -> Result<SchemedKeyValue> {
    let entry = resolve(list, label, key)?;
    Ok(SchemedKeyValue::controlled(scheme, &entry.key, &entry.value))
}

/// Form string for an optional external string
pub(crate) fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

/// External optional string for a form string
pub(crate) fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Form strings without the empty ones
pub(crate) fn non_empty_strings(values: &[String]) -> Vec<String> {
    values.iter().filter(|v| !v.is_empty()).cloned().collect()
}

/// A form key that must be in `list`; an empty key gives `None`
pub(crate) fn listed_key(list: &DropdownList, label: &str, key: &str) -> Result<Option<String>> {
    if key.is_empty() {
        return Ok(None);
    }
    resolve(list, label, key).map(|entry| Some(entry.key.clone()))
}

/// Non-empty keys, each of which must be in `list`
pub(crate) fn checked_keys(keys: &[String], list: &DropdownList, label: &str) -> Result<Vec<String>> {
    keys.iter()
        .filter(|key| !key.is_empty())
        .map(|key| resolve(list, label, key).map(|entry| entry.key.clone()))
        .collect()
}

/// Split a mixed controlled/free group into form keys and free texts
///
/// Entries carrying `scheme` contribute their key, entries without a scheme
/// their value. An entry with another scheme is kept as free text and
/// recorded as an issue.
pub(crate) fn split_controlled(
    entries: &[SchemedKeyValue],
    scheme: &str,
    list: &DropdownList,
    label: &str,
    keys_field: &str,
    free_field: &str,
    issues: &mut Issues,
) -> (Vec<String>, Vec<String>) {
    let mut keys = Vec::new();
    let mut free = Vec::new();

    for entry in entries {
        match entry.scheme.as_deref() {
            Some(s) if s == scheme => {
                let key = text(entry.key.as_ref());
                let path = FieldPath::new(vec![keys_field.into(), keys.len().into()]);
                issues.check_key(list, label, &key, &path);
                keys.push(key);
            }
            None => free.push(text(entry.value.as_ref())),
            Some(other) => {
                let path = FieldPath::new(vec![free_field.into(), free.len().into()]);
                issues.record(&path, &DepositError::unknown_key(format!("{label} scheme"), other));
                free.push(text(entry.value.as_ref()));
            }
        }
    }

    (keys, free)
}

/// Join form keys and free texts back into a mixed group, controlled first
pub(crate) fn join_controlled(
    keys: &[String],
    free: &[String],
    scheme: &str,
    list: &DropdownList,
    label: &str,
) -> Result<Vec<SchemedKeyValue>> {
    let mut entries = keys
        .iter()
        .filter(|key| !key.is_empty())
        .map(|key| controlled_value(list, label, scheme, key))
        .collect::<Result<Vec<_>>>()?;
    entries.extend(
        free.iter()
            .filter(|value| !value.is_empty())
            .map(SchemedKeyValue::free),
    );
    Ok(entries)
}
