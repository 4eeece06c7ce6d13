//! Date conversion
//!
//! The external document keeps all dates in one qualified array. The form
//! has a slot for the creation and availability dates and two rows groups
//! for the rest: W3CDTF-encoded dates and free-text dates. A submission
//! without an availability date becomes available at the moment it is
//! submitted.

use chrono::{DateTime, SecondsFormat, Utc};
use deposit_core::{
    DepositError, DropdownLists, FieldPath, Result,
    external::{QualifiedSchemedValue, vocab},
    form::FormQualifiedValue,
};

use super::DeconvertMode;
use super::controlled::{Issues, listed_key, non_empty, text};
use super::defaults::{seed, settle};

/// Dates as the form holds them
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct FormDates {
    pub(crate) created: String,
    pub(crate) available: String,
    pub(crate) iso8601: Vec<FormQualifiedValue>,
    pub(crate) free: Vec<FormQualifiedValue>,
}

pub(crate) fn convert_dates(
    dates: &[QualifiedSchemedValue],
    lists: &DropdownLists,
    issues: &mut Issues,
) -> FormDates {
    let mut form = FormDates::default();

    for date in dates {
        let qualifier = text(date.qualifier.as_ref());
        let value = text(date.value.as_ref());
        let w3cdtf = date.scheme.as_deref() == Some(vocab::SCHEME_W3CDTF);

        if w3cdtf && qualifier == vocab::QUALIFIER_CREATED && form.created.is_empty() {
            form.created = value;
        } else if w3cdtf && qualifier == vocab::QUALIFIER_AVAILABLE && form.available.is_empty() {
            form.available = value;
        } else if w3cdtf {
            let path = FieldPath::new(vec!["datesIso8601".into(), form.iso8601.len().into()]);
            issues.check_key(&lists.dates, "date qualifier", &qualifier, &path.join("qualifier"));
            form.iso8601.push(FormQualifiedValue { qualifier, value });
        } else {
            let path = FieldPath::new(vec!["dates".into(), form.free.len().into()]);
            issues.check_key(&lists.dates, "date qualifier", &qualifier, &path.join("qualifier"));
            if let Some(scheme) = &date.scheme {
                issues.record(&path.join("value"), &DepositError::unknown_key("date scheme", scheme));
            }
            form.free.push(FormQualifiedValue { qualifier, value });
        }
    }

    form.iso8601 = seed(form.iso8601);
    form.free = seed(form.free);
    form
}

/// W3CDTF timestamp for a moment, in UTC with milliseconds
pub(crate) fn w3cdtf_timestamp(moment: DateTime<Utc>) -> String {
    moment.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Dates in external order: created, available, W3CDTF rows, free rows
///
/// On submit an empty availability date is set to `now`.
pub(crate) fn deconvert_dates(
    form: &FormDates,
    lists: &DropdownLists,
    mode: DeconvertMode,
    now: DateTime<Utc>,
) -> Result<Vec<QualifiedSchemedValue>> {
    let slot = |qualifier: &str, value: &str| {
        non_empty(value).map(|value| QualifiedSchemedValue {
            qualifier: Some(qualifier.to_string()),
            scheme: Some(vocab::SCHEME_W3CDTF.to_string()),
            value: Some(value),
        })
    };

    let available = match non_empty(&form.available) {
        None if mode.is_submit() => w3cdtf_timestamp(now),
        _ => form.available.clone(),
    };

    let mut dates: Vec<QualifiedSchemedValue> = slot(vocab::QUALIFIER_CREATED, &form.created)
        .into_iter()
        .chain(slot(vocab::QUALIFIER_AVAILABLE, &available))
        .collect();

    for row in settle(&form.iso8601, mode) {
        dates.push(QualifiedSchemedValue {
            qualifier: listed_key(&lists.dates, "date qualifier", &row.qualifier)?,
            scheme: Some(vocab::SCHEME_W3CDTF.to_string()),
            value: non_empty(&row.value),
        });
    }
    for row in settle(&form.free, mode) {
        dates.push(QualifiedSchemedValue {
            qualifier: listed_key(&lists.dates, "date qualifier", &row.qualifier)?,
            scheme: None,
            value: non_empty(&row.value),
        });
    }

    Ok(dates)
}
