//! Mandatory default injection
//!
//! Some groups must always reach the API with at least their scheme or
//! qualifier, even when the depositor left them blank. The converter seeds
//! such groups with a default row; the deconverter decides per mode what a
//! blank row becomes.

use deposit_core::{
    external::vocab,
    form::{FormQualifiedSchemedValue, FormQualifiedValue, FormRelation, FormSchemedValue},
};

use super::DeconvertMode;

/// A form row belonging to a group with a mandatory default
pub(crate) trait DefaultedRow: Clone + Default {
    /// The default row of the group
    fn default_row() -> Self;

    /// Whether the row carries no value beyond its tags
    fn has_no_value(&self) -> bool;

    /// Whether the row carries a scheme or qualifier
    fn has_tag(&self) -> bool;
}

impl DefaultedRow for FormSchemedValue {
    fn default_row() -> Self {
        FormSchemedValue::new(vocab::ID_DOI, "")
    }

    fn has_no_value(&self) -> bool {
        self.value.is_empty()
    }

    fn has_tag(&self) -> bool {
        !self.scheme.is_empty()
    }
}

impl DefaultedRow for FormQualifiedSchemedValue {
    fn default_row() -> Self {
        FormQualifiedSchemedValue {
            qualifier: vocab::QUALIFIER_RELATION.to_string(),
            scheme: vocab::ID_DOI.to_string(),
            value: String::new(),
        }
    }

    fn has_no_value(&self) -> bool {
        self.value.is_empty()
    }

    fn has_tag(&self) -> bool {
        !self.qualifier.is_empty() || !self.scheme.is_empty()
    }
}

impl DefaultedRow for FormRelation {
    fn default_row() -> Self {
        FormRelation {
            qualifier: vocab::QUALIFIER_RELATION.to_string(),
            ..Default::default()
        }
    }

    fn has_no_value(&self) -> bool {
        self.url.is_empty() && self.title.is_empty()
    }

    fn has_tag(&self) -> bool {
        !self.qualifier.is_empty()
    }
}

impl DefaultedRow for FormQualifiedValue {
    fn default_row() -> Self {
        FormQualifiedValue {
            qualifier: vocab::QUALIFIER_DATE.to_string(),
            value: String::new(),
        }
    }

    fn has_no_value(&self) -> bool {
        self.value.is_empty()
    }

    fn has_tag(&self) -> bool {
        !self.qualifier.is_empty()
    }
}

/// Rows the converter puts in the form for an external group
pub(crate) fn seed<R: DefaultedRow>(rows: Vec<R>) -> Vec<R> {
    if rows.is_empty() { vec![R::default_row()] } else { rows }
}

/// Rows the deconverter emits for a form group
///
/// Rows with a value pass through. A blank row that still carries its
/// scheme or qualifier passes through as that tag alone. A blank row without
/// tags becomes the default row on submit and is dropped on save; on submit
/// an empty result is replaced by the default row.
pub(crate) fn settle<R: DefaultedRow>(rows: &[R], mode: DeconvertMode) -> Vec<R> {
    let mut settled: Vec<R> = rows
        .iter()
        .filter_map(|row| {
            if !row.has_no_value() || row.has_tag() {
                Some(row.clone())
            } else if mode.is_submit() {
                Some(R::default_row())
            } else {
                None
            }
        })
        .collect();

    if settled.is_empty() && mode.is_submit() {
        settled.push(R::default_row());
    }
    settled
}
