//! Conversion between the external and the form metadata documents
//!
//! [`metadata_converter`] projects an [`ExternalMetadata`] onto the form,
//! resolving controlled values against the dropdown lists.
//! [`metadata_deconverter`] is its inverse. For a well-formed document whose
//! controlled values all appear in the lists,
//! `metadata_deconverter(metadata_converter(m).form)` gives back `m`, plus
//! the mandatory defaults for groups `m` left empty.
//!
//! Both directions are pure: no I/O, no shared state. The only input from
//! outside is the submission time, which [`metadata_deconverter_at`] takes
//! as an argument and [`metadata_deconverter`] reads from the clock.

mod contributor;
mod controlled;
mod dates;
mod defaults;
mod license;
mod relations;

pub use license::{license_converter, license_deconverter};

use chrono::{DateTime, Utc};
use deposit_core::{
    DepositError, DropdownLists, ErrorTree, ExternalMetadata, FieldPath, FormMetadata, Result,
    external::{SchemedValue, SpatialBox, SpatialPoint, vocab},
    form::{FormSchemedValue, FormSpatialBox, FormSpatialPoint},
};
use tracing::debug;

use controlled::{
    Issues, checked_keys, controlled_value, join_controlled, listed_key, non_empty,
    non_empty_strings, split_controlled, text,
};
use defaults::{seed, settle};

/// What the deconverted document is for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeconvertMode {
    /// Final submission: blank mandatory rows get their default tags
    Submit,
    /// Draft save: blank rows without tags are left out
    Save,
}

impl DeconvertMode {
    /// Mode for the given submit flag
    #[must_use]
    pub fn from_submit(is_submit: bool) -> Self {
        if is_submit { Self::Submit } else { Self::Save }
    }

    /// Whether this is a submission
    #[must_use]
    pub fn is_submit(self) -> bool {
        self == Self::Submit
    }
}

/// Result of converting an external document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedMetadata {
    /// The form document
    pub form: FormMetadata,
    /// Placeholders for controlled values that could not be resolved,
    /// keyed by form path
    pub issues: ErrorTree,
}

impl ConvertedMetadata {
    /// Whether every controlled value was resolved
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// The form document, discarding the issues
    #[must_use]
    pub fn into_form(self) -> FormMetadata {
        self.form
    }
}

/// Convert an external document into the form document
///
/// Unknown controlled values stay in the form under their raw key and are
/// reported in [`ConvertedMetadata::issues`].
///
/// # Errors
///
/// Returns `DepositError::UnknownLicense` when the license is not in the
/// license list.
pub fn metadata_converter(
    external: &ExternalMetadata,
    lists: &DropdownLists,
) -> Result<ConvertedMetadata> {
    let mut issues = Issues::default();

    let license = external
        .license
        .as_deref()
        .map(license_converter(&lists.licenses))
        .transpose()?
        .unwrap_or_default();

    let language_of_description = match &external.language_of_description {
        Some(language) => {
            let key = text(language.key.as_ref());
            let path = FieldPath::new(vec!["languageOfDescription".into()]);
            match language.scheme.as_deref() {
                Some(other) if other != vocab::SCHEME_LANGUAGE => {
                    issues.record(&path, &DepositError::unknown_key("language scheme", other));
                }
                _ => issues.check_key(&lists.languages, "language", &key, &path),
            }
            key
        }
        None => String::new(),
    };

    let audiences = external
        .audiences
        .iter()
        .enumerate()
        .map(|(i, audience)| {
            let key = text(audience.key.as_ref());
            let path = FieldPath::new(vec!["audiences".into(), i.into()]);
            match audience.scheme.as_deref() {
                Some(other) if other != vocab::SCHEME_AUDIENCE => {
                    issues.record(&path, &DepositError::unknown_key("audience scheme", other));
                }
                _ => issues.check_key(&lists.audiences, "audience", &key, &path),
            }
            key
        })
        .collect();

    let (subjects_abr_complex, subjects) = split_controlled(
        &external.subjects,
        vocab::SCHEME_ABR_COMPLEX,
        &lists.abr_complex_subjects,
        "subject",
        "subjectsAbrComplex",
        "subjects",
        &mut issues,
    );

    let alternative_identifiers = external
        .alternative_identifiers
        .iter()
        .enumerate()
        .map(|(i, id)| {
            let scheme = text(id.scheme.as_ref());
            let path = FieldPath::new(vec!["alternativeIdentifiers".into(), i.into(), "scheme".into()]);
            issues.check_key(&lists.identifiers, "identifier scheme", &scheme, &path);
            FormSchemedValue::new(scheme, text(id.value.as_ref()))
        })
        .collect();

    let (related_identifiers, relations) =
        relations::convert_relations(&external.relations, lists, &mut issues);

    let (languages_of_files_iso639, languages_of_files) = split_controlled(
        &external.languages_of_files,
        vocab::SCHEME_LANGUAGE,
        &lists.languages,
        "language",
        "languagesOfFilesIso639",
        "languagesOfFiles",
        &mut issues,
    );

    let form_dates = dates::convert_dates(&external.dates, lists, &mut issues);

    for (i, dcmi_type) in external.types_dcmi.iter().enumerate() {
        let path = FieldPath::new(vec!["typesDcmi".into(), i.into()]);
        issues.check_key(&lists.dcmi_types, "DCMI type", dcmi_type, &path);
    }

    let (formats_media_type, formats) = split_formats(&external.formats, lists, &mut issues);

    let (temporal_coverages_abr, temporal_coverages) = split_controlled(
        &external.temporal_coverages,
        vocab::SCHEME_ABR_PERIODE,
        &lists.abr_periode_temporals,
        "temporal coverage",
        "temporalCoveragesAbr",
        "temporalCoverages",
        &mut issues,
    );

    let (spatial_coverage_iso, spatial_coverages) = split_controlled(
        &external.spatial_coverages,
        vocab::SCHEME_ISO3166,
        &lists.spatial_coverages_iso,
        "spatial coverage",
        "spatialCoverageIso",
        "spatialCoverages",
        &mut issues,
    );

    let spatial_points = external
        .spatial_points
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let scheme = text(point.scheme.as_ref());
            let path = FieldPath::new(vec!["spatialPoints".into(), i.into(), "scheme".into()]);
            issues.check_key(&lists.spatial_coordinates, "coordinate system", &scheme, &path);
            FormSpatialPoint {
                scheme,
                x: text(point.x.as_ref()),
                y: text(point.y.as_ref()),
            }
        })
        .collect();

    let spatial_boxes = external
        .spatial_boxes
        .iter()
        .enumerate()
        .map(|(i, bounds)| {
            let scheme = text(bounds.scheme.as_ref());
            let path = FieldPath::new(vec!["spatialBoxes".into(), i.into(), "scheme".into()]);
            issues.check_key(&lists.spatial_coordinates, "coordinate system", &scheme, &path);
            FormSpatialBox {
                scheme,
                north: text(bounds.north.as_ref()),
                east: text(bounds.east.as_ref()),
                south: text(bounds.south.as_ref()),
                west: text(bounds.west.as_ref()),
            }
        })
        .collect();

    let creators = contributor::convert_creators(&external.creators, lists, &mut issues);
    let groups = contributor::convert_contributors(&external.contributors, lists, &mut issues);

    let form = FormMetadata {
        doi: text(external.doi.as_ref()),
        language_of_description,
        titles: external.titles.clone(),
        alternative_titles: external.alternative_titles.clone(),
        descriptions: external.descriptions.clone(),
        creators,
        contributors: groups.contributors,
        rights_holders: groups.rights_holders,
        audiences,
        subjects,
        subjects_abr_complex,
        alternative_identifiers: seed(alternative_identifiers),
        related_identifiers,
        relations,
        languages_of_files_iso639,
        languages_of_files,
        date_created: form_dates.created,
        date_available: form_dates.available,
        dates_iso8601: form_dates.iso8601,
        dates: form_dates.free,
        sources: external.sources.clone(),
        instructions_for_reuse: external.instructions_for_reuse.clone(),
        publishers: external.publishers.clone(),
        access_rights: external.access_rights.unwrap_or_default(),
        license,
        types_dcmi: external.types_dcmi.clone(),
        types: external.types.clone(),
        formats_media_type,
        formats,
        temporal_coverages_abr,
        temporal_coverages,
        spatial_points,
        spatial_boxes,
        spatial_coverage_iso,
        spatial_coverages,
        message_for_data_manager: text(external.message_for_data_manager.as_ref()),
        privacy_sensitive_data_present: external.privacy_sensitive_data_present,
        accept_deposit_agreement: external.accept_deposit_agreement,
    };

    let issues = issues.into_tree();
    debug!(clean = issues.is_empty(), "converted external metadata to form");
    Ok(ConvertedMetadata { form, issues })
}

fn split_formats(
    formats: &[SchemedValue],
    lists: &DropdownLists,
    issues: &mut Issues,
) -> (Vec<String>, Vec<String>) {
    let mut media_types = Vec::new();
    let mut free = Vec::new();

    for format in formats {
        let value = text(format.value.as_ref());
        match format.scheme.as_deref() {
            Some(vocab::SCHEME_IMT) => {
                let path = FieldPath::new(vec!["formatsMediaType".into(), media_types.len().into()]);
                issues.check_key(&lists.imt_formats, "media type", &value, &path);
                media_types.push(value);
            }
            None => free.push(value),
            Some(other) => {
                let path = FieldPath::new(vec!["formats".into(), free.len().into()]);
                issues.record(&path, &DepositError::unknown_key("format scheme", other));
                free.push(value);
            }
        }
    }

    (media_types, free)
}

/// Convert the form document back into an external document
///
/// A submission without an availability date is made available now; see
/// [`metadata_deconverter_at`].
///
/// # Errors
///
/// Returns `DepositError::UnknownLicense` for a license outside the license
/// list and `DepositError::UnknownKey` for any other selected key that is
/// not in its dropdown list.
pub fn metadata_deconverter(
    form: &FormMetadata,
    lists: &DropdownLists,
    mode: DeconvertMode,
) -> Result<ExternalMetadata> {
    metadata_deconverter_at(form, lists, mode, Utc::now())
}

/// [`metadata_deconverter`] with an explicit submission time
///
/// `submitted_at` becomes the availability date when a submission has none.
///
/// # Errors
///
/// Same as [`metadata_deconverter`].
pub fn metadata_deconverter_at(
    form: &FormMetadata,
    lists: &DropdownLists,
    mode: DeconvertMode,
    submitted_at: DateTime<Utc>,
) -> Result<ExternalMetadata> {
    let license = non_empty(&form.license)
        .map(|key| license_deconverter(&lists.licenses)(key.as_str()))
        .transpose()?;

    let language_of_description = non_empty(&form.language_of_description)
        .map(|key| controlled_value(&lists.languages, "language", vocab::SCHEME_LANGUAGE, &key))
        .transpose()?;

    let mut contributors = contributor::deconvert_contributors(&form.contributors, lists)?;
    contributors.extend(contributor::deconvert_rights_holders(&form.rights_holders, lists)?);

    let audiences = form
        .audiences
        .iter()
        .filter(|key| !key.is_empty())
        .map(|key| controlled_value(&lists.audiences, "audience", vocab::SCHEME_AUDIENCE, key))
        .collect::<Result<Vec<_>>>()?;

    let alternative_identifiers = settle(&form.alternative_identifiers, mode)
        .into_iter()
        .map(|row| {
            Ok(SchemedValue {
                scheme: listed_key(&lists.identifiers, "identifier scheme", &row.scheme)?,
                value: non_empty(&row.value),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let form_dates = dates::FormDates {
        created: form.date_created.clone(),
        available: form.date_available.clone(),
        iso8601: form.dates_iso8601.clone(),
        free: form.dates.clone(),
    };

    let mut formats: Vec<SchemedValue> =
        checked_keys(&form.formats_media_type, &lists.imt_formats, "media type")?
            .into_iter()
            .map(|media_type| SchemedValue::schemed(vocab::SCHEME_IMT, media_type))
            .collect();
    formats.extend(non_empty_strings(&form.formats).into_iter().map(SchemedValue::free));

    let spatial_points = form
        .spatial_points
        .iter()
        .filter(|point| !point.is_empty())
        .map(|point| {
            Ok(SpatialPoint {
                scheme: listed_key(&lists.spatial_coordinates, "coordinate system", &point.scheme)?,
                x: non_empty(&point.x),
                y: non_empty(&point.y),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let spatial_boxes = form
        .spatial_boxes
        .iter()
        .filter(|bounds| !bounds.is_empty())
        .map(|bounds| {
            Ok(SpatialBox {
                scheme: listed_key(&lists.spatial_coordinates, "coordinate system", &bounds.scheme)?,
                north: non_empty(&bounds.north),
                east: non_empty(&bounds.east),
                south: non_empty(&bounds.south),
                west: non_empty(&bounds.west),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let external = ExternalMetadata {
        doi: non_empty(&form.doi),
        language_of_description,
        titles: non_empty_strings(&form.titles),
        alternative_titles: non_empty_strings(&form.alternative_titles),
        descriptions: non_empty_strings(&form.descriptions),
        creators: contributor::deconvert_contributors(&form.creators, lists)?,
        contributors,
        audiences,
        subjects: join_controlled(
            &form.subjects_abr_complex,
            &form.subjects,
            vocab::SCHEME_ABR_COMPLEX,
            &lists.abr_complex_subjects,
            "subject",
        )?,
        alternative_identifiers,
        relations: relations::deconvert_relations(
            &form.related_identifiers,
            &form.relations,
            lists,
            mode,
        )?,
        languages_of_files: join_controlled(
            &form.languages_of_files_iso639,
            &form.languages_of_files,
            vocab::SCHEME_LANGUAGE,
            &lists.languages,
            "language",
        )?,
        dates: dates::deconvert_dates(&form_dates, lists, mode, submitted_at)?,
        sources: non_empty_strings(&form.sources),
        instructions_for_reuse: non_empty_strings(&form.instructions_for_reuse),
        publishers: non_empty_strings(&form.publishers),
        access_rights: Some(form.access_rights),
        license,
        types_dcmi: checked_keys(&form.types_dcmi, &lists.dcmi_types, "DCMI type")?,
        types: non_empty_strings(&form.types),
        formats,
        temporal_coverages: join_controlled(
            &form.temporal_coverages_abr,
            &form.temporal_coverages,
            vocab::SCHEME_ABR_PERIODE,
            &lists.abr_periode_temporals,
            "temporal coverage",
        )?,
        spatial_points,
        spatial_boxes,
        spatial_coverages: join_controlled(
            &form.spatial_coverage_iso,
            &form.spatial_coverages,
            vocab::SCHEME_ISO3166,
            &lists.spatial_coverages_iso,
            "spatial coverage",
        )?,
        message_for_data_manager: non_empty(&form.message_for_data_manager),
        privacy_sensitive_data_present: form.privacy_sensitive_data_present,
        accept_deposit_agreement: form.accept_deposit_agreement,
    };

    debug!(submit = mode.is_submit(), "deconverted form metadata");
    Ok(external)
}
