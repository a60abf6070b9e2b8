//! Filtering and grouping used by the dashboard and level listings.

use crate::catalog::{Category, GroupField, Level, Section, Term};
use crate::resource::NormalizedResource;

/// Group heading used when a resource has no value for the grouping field.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A named run of resources within a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroup<'a> {
    /// Group heading.
    pub name: String,
    /// Resources in backend order.
    pub resources: Vec<&'a NormalizedResource>,
}

/// Resources for a dashboard section, grouped by level or term.
///
/// Groups appear in the order their first resource appears.
#[must_use]
pub fn group_for_section(
    resources: &[NormalizedResource],
    section: Section,
) -> Vec<ResourceGroup<'_>> {
    let wanted = section.category();
    let mut groups: Vec<ResourceGroup<'_>> = Vec::new();

    for resource in resources {
        let category = resource.category.as_deref().and_then(Category::parse);
        if category != Some(wanted) {
            continue;
        }

        let key = group_key(resource, section.group_field());

        match groups.iter_mut().find(|group| group.name == key) {
            Some(group) => group.resources.push(resource),
            None => groups.push(ResourceGroup {
                name: key.to_string(),
                resources: vec![resource],
            }),
        }
    }

    groups
}

/// Heading for a resource: the catalog label when the value is a known code
/// or label, else the trimmed raw value.
fn group_key(resource: &NormalizedResource, field: GroupField) -> &str {
    let raw = match field {
        GroupField::Level => resource.level.as_deref(),
        GroupField::Term => resource.term.as_deref(),
    }
    .map(str::trim)
    .filter(|raw| !raw.is_empty());

    let Some(raw) = raw else {
        return UNCATEGORIZED;
    };
    let label: Option<&str> = match field {
        GroupField::Level => Level::parse(raw).map(|level| level.label()),
        GroupField::Term => Term::parse(raw).map(|term| term.label()),
    };
    label.unwrap_or(raw)
}

/// Resources for a level page, grouped by category in listing order.
///
/// Only resources whose trimmed level equals `level_label` are kept, and only
/// the five known categories are listed.
#[must_use]
pub fn group_for_level<'a>(
    resources: &'a [NormalizedResource],
    level_label: &str,
) -> Vec<ResourceGroup<'a>> {
    let on_level: Vec<&NormalizedResource> = resources
        .iter()
        .filter(|resource| resource.level.as_deref().map(str::trim) == Some(level_label))
        .collect();

    Category::listing_order()
        .iter()
        .filter_map(|category| {
            let members: Vec<&NormalizedResource> = on_level
                .iter()
                .copied()
                .filter(|resource| {
                    resource.category.as_deref().and_then(Category::parse) == Some(*category)
                })
                .collect();
            (!members.is_empty()).then(|| ResourceGroup {
                name: category.label().to_string(),
                resources: members,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::resource::{RawResource, normalize};

    fn resources() -> Vec<NormalizedResource> {
        [
            json!({"id": 1, "category": "NOTES", "level": "Form 4"}),
            json!({"id": 2, "category": "Notes", "level": "Form 2"}),
            json!({"id": 3, "category": "notes"}),
            json!({"id": 4, "category": "EXAMS", "term": "Term 1", "level": "High School"}),
            json!({"id": 5, "category": "Notes", "level": "Form 4"}),
            json!({"id": 6, "category": "E-Books", "level": "High School"}),
            json!({"id": 7, "category": "Videos", "level": "High School"}),
        ]
        .into_iter()
        .map(|value| normalize(&RawResource::from_value(value)))
        .collect()
    }

    fn ids(group: &ResourceGroup<'_>) -> Vec<i64> {
        group.resources.iter().filter_map(|r| r.id).collect()
    }

    #[test]
    fn test_section_groups_by_level_in_first_seen_order() {
        let resources = resources();
        let groups = group_for_section(&resources, Section::Notes);

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Form 4", "Form 2", UNCATEGORIZED]);
        assert_eq!(ids(&groups[0]), vec![1, 5]);
    }

    #[test]
    fn test_codes_and_labels_share_a_group() {
        let resources: Vec<NormalizedResource> = [
            json!({"id": 1, "category": "NOTES", "level": "FORM4"}),
            json!({"id": 2, "category": "Notes", "level": "Form 4"}),
            json!({"id": 3, "category": "Notes", "level": " form 4 "}),
            json!({"id": 4, "category": "EXAMS", "term": "T2"}),
            json!({"id": 5, "category": "Exams", "term": "Term 2"}),
        ]
        .into_iter()
        .map(|value| normalize(&RawResource::from_value(value)))
        .collect();

        let notes = group_for_section(&resources, Section::Notes);
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].name, "Form 4");
        assert_eq!(ids(&notes[0]), vec![1, 2, 3]);

        let exams = group_for_section(&resources, Section::Exams);
        assert_eq!(exams.len(), 1);
        assert_eq!(exams[0].name, "Term 2");
        assert_eq!(ids(&exams[0]), vec![4, 5]);
    }

    #[test]
    fn test_exam_section_groups_by_term() {
        let resources = resources();
        let groups = group_for_section(&resources, Section::Exams);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "Term 1");
    }

    #[test]
    fn test_empty_section() {
        let resources = resources();
        assert!(group_for_section(&resources, Section::Lessons).is_empty());
    }

    #[test]
    fn test_level_groups_follow_listing_order() {
        let resources = resources();
        let groups = group_for_level(&resources, "High School");

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        // E-Books before Exams, unknown "Videos" dropped
        assert_eq!(names, vec!["E-Books", "Exams"]);
    }
}
