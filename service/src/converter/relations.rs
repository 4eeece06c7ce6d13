//! Relation conversion

use deposit_core::{
    DropdownLists, FieldPath, Result,
    external::Relation,
    form::{FormQualifiedSchemedValue, FormRelation},
};

use super::DeconvertMode;
use super::controlled::{Issues, listed_key, non_empty, text};
use super::defaults::{seed, settle};

pub(crate) fn convert_relations(
    relations: &[Relation],
    lists: &DropdownLists,
    issues: &mut Issues,
) -> (Vec<FormQualifiedSchemedValue>, Vec<FormRelation>) {
    let mut identifiers = Vec::new();
    let mut links = Vec::new();

    for relation in relations {
        let qualifier = text(relation.qualifier.as_ref());
        if relation.is_identifier() {
            let path = FieldPath::new(vec!["relatedIdentifiers".into(), identifiers.len().into()]);
            let scheme = text(relation.scheme.as_ref());
            issues.check_key(&lists.relations, "relation", &qualifier, &path.join("qualifier"));
            issues.check_key(&lists.identifiers, "identifier scheme", &scheme, &path.join("scheme"));
            identifiers.push(FormQualifiedSchemedValue {
                qualifier,
                scheme,
                value: text(relation.value.as_ref()),
            });
        } else {
            let path = FieldPath::new(vec!["relations".into(), links.len().into()]);
            issues.check_key(&lists.relations, "relation", &qualifier, &path.join("qualifier"));
            links.push(FormRelation {
                qualifier,
                url: text(relation.url.as_ref()),
                title: text(relation.title.as_ref()),
            });
        }
    }

    (seed(identifiers), seed(links))
}

/// Identifier relations first, then link relations
pub(crate) fn deconvert_relations(
    identifiers: &[FormQualifiedSchemedValue],
    links: &[FormRelation],
    lists: &DropdownLists,
    mode: DeconvertMode,
) -> Result<Vec<Relation>> {
    let mut relations = Vec::new();

    for row in settle(identifiers, mode) {
        relations.push(Relation {
            qualifier: listed_key(&lists.relations, "relation", &row.qualifier)?,
            scheme: listed_key(&lists.identifiers, "identifier scheme", &row.scheme)?,
            value: non_empty(&row.value),
            ..Default::default()
        });
    }
    for row in settle(links, mode) {
        relations.push(Relation {
            qualifier: listed_key(&lists.relations, "relation", &row.qualifier)?,
            url: non_empty(&row.url),
            title: non_empty(&row.title),
            ..Default::default()
        });
    }

    Ok(relations)
}
