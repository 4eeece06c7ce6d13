//! Creator, contributor and rights holder conversion

use deposit_core::{
    DropdownLists, FieldPath, Result,
    external::{Contributor, SchemedKeyValue, SchemedValue, vocab},
    form::{FormContributor, FormSchemedValue},
};

use super::controlled::{Issues, controlled_value, listed_key, non_empty, text};

/// Contributors split the way the form shows them
pub(crate) struct ContributorGroups {
    pub(crate) contributors: Vec<FormContributor>,
    pub(crate) rights_holders: Vec<FormContributor>,
}

/// Convert one contributor; `path` is its position in the form
pub(crate) fn convert_contributor(
    contributor: &Contributor,
    lists: &DropdownLists,
    path: &FieldPath,
    issues: &mut Issues,
) -> FormContributor {
    let ids = contributor
        .ids
        .iter()
        .enumerate()
        .map(|(j, id)| {
            let scheme = text(id.scheme.as_ref());
            let scheme_path = path.join("ids").join(j).join("scheme");
            issues.check_key(&lists.contributor_ids, "identifier scheme", &scheme, &scheme_path);
            FormSchemedValue::new(scheme, text(id.value.as_ref()))
        })
        .collect();

    let role = match &contributor.role {
        Some(role) => {
            let key = text(role.key.as_ref());
            issues.check_key(&lists.contributor_roles, "contributor role", &key, &path.join("role"));
            key
        }
        None => String::new(),
    };

    FormContributor {
        titles: text(contributor.titles.as_ref()),
        initials: text(contributor.initials.as_ref()),
        insertions: text(contributor.insertions.as_ref()),
        surname: text(contributor.surname.as_ref()),
        ids,
        role,
        organization: text(contributor.organization.as_ref()),
    }
}

/// Convert the creators group
pub(crate) fn convert_creators(
    creators: &[Contributor],
    lists: &DropdownLists,
    issues: &mut Issues,
) -> Vec<FormContributor> {
    creators
        .iter()
        .enumerate()
        .map(|(i, c)| convert_contributor(c, lists, &FieldPath::new(vec!["creators".into(), i.into()]), issues))
        .collect()
}

/// Convert the contributors group, separating rights holders
pub(crate) fn convert_contributors(
    contributors: &[Contributor],
    lists: &DropdownLists,
    issues: &mut Issues,
) -> ContributorGroups {
    let mut groups = ContributorGroups {
        contributors: Vec::new(),
        rights_holders: Vec::new(),
    };

    for contributor in contributors {
        if contributor.is_rights_holder() {
            // the group implies the role
            let without_role = Contributor {
                role: None,
                ..contributor.clone()
            };
            let path = FieldPath::new(vec!["rightsHolders".into(), groups.rights_holders.len().into()]);
            groups
                .rights_holders
                .push(convert_contributor(&without_role, lists, &path, issues));
        } else {
            let path = FieldPath::new(vec!["contributors".into(), groups.contributors.len().into()]);
            groups
                .contributors
                .push(convert_contributor(contributor, lists, &path, issues));
        }
    }

    groups
}

/// Deconvert one contributor; empty rows yield `None`
///
/// `role` overrides the form's role, which rights holders need.
pub(crate) fn deconvert_contributor(
    contributor: &FormContributor,
    role: Option<SchemedKeyValue>,
    lists: &DropdownLists,
) -> Result<Option<Contributor>> {
    if contributor.is_empty() {
        return Ok(None);
    }

    let role = match role {
        Some(role) => Some(role),
        None if contributor.role.is_empty() => None,
        None => Some(controlled_value(
            &lists.contributor_roles,
            "contributor role",
            vocab::SCHEME_CONTRIBUTOR_TYPE,
            &contributor.role,
        )?),
    };

    let ids = contributor
        .ids
        .iter()
        .filter(|id| !id.is_empty())
        .map(|id| {
            Ok(SchemedValue {
                scheme: listed_key(&lists.contributor_ids, "identifier scheme", &id.scheme)?,
                value: non_empty(&id.value),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Some(Contributor {
        titles: non_empty(&contributor.titles),
        initials: non_empty(&contributor.initials),
        insertions: non_empty(&contributor.insertions),
        surname: non_empty(&contributor.surname),
        ids,
        role,
        organization: non_empty(&contributor.organization),
    }))
}

/// Deconvert a group of contributors, dropping empty rows
pub(crate) fn deconvert_contributors(
    contributors: &[FormContributor],
    lists: &DropdownLists,
) -> Result<Vec<Contributor>> {
    contributors
        .iter()
        .filter_map(|c| deconvert_contributor(c, None, lists).transpose())
        .collect()
}

/// Deconvert rights holders, giving each the rights-holder role
pub(crate) fn deconvert_rights_holders(
    rights_holders: &[FormContributor],
    lists: &DropdownLists,
) -> Result<Vec<Contributor>> {
    let mut result = Vec::new();
    for rights_holder in rights_holders.iter().filter(|r| !r.is_empty()) {
        let role = controlled_value(
            &lists.contributor_roles,
            "contributor role",
            vocab::SCHEME_CONTRIBUTOR_TYPE,
            vocab::ROLE_RIGHTS_HOLDER,
        )?;
        if let Some(contributor) = deconvert_contributor(rights_holder, Some(role), lists)? {
            result.push(contributor);
        }
    }
    Ok(result)
}
