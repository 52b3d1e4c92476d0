use crate::{core::selection::TagSelectionSet, models::Project};

/// Projects whose tags contain every selected tag, keeping input order.
///
/// An empty selection matches everything. Matching is conjunctive: a
/// project tagged `{A}` is dropped once `{A, B}` is selected.
pub fn filter_projects<'a>(
    projects: &'a [Project],
    selected: &TagSelectionSet,
) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| matches_selection(project, selected))
        .collect()
}

pub fn matches_selection(project: &Project, selected: &TagSelectionSet) -> bool {
    selected.is_subset_of(&project.tag_ids)
}
