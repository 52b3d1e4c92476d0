use std::fmt::Write;

use crate::{
    core::{CenterCatalog, TagCatalog, TagSelectionSet},
    models::Project,
    ui::components::{project_card, tag_chip},
};

pub const EMPTY_TITLE: &str = "No projects found.";
pub const EMPTY_HINT: &str = "Try removing or changing the filters.";

/// Chips in catalog order, whatever order they were selected in.
pub fn filter_bar(tags: &TagCatalog, selected: &TagSelectionSet) -> String {
    let mut out = String::from("Filters\n");
    for tag in tags.tags() {
        let _ = writeln!(out, "  {}", tag_chip(tag, selected.contains(&tag.id)));
    }
    out
}

pub fn empty_state() -> String {
    format!("{EMPTY_TITLE}\n{EMPTY_HINT}\n")
}

pub fn project_listing(
    projects: &[&Project],
    tags: &TagCatalog,
    centers: &CenterCatalog,
) -> String {
    if projects.is_empty() {
        return empty_state();
    }
    let mut out = String::from("Projects\n\n");
    for project in projects {
        let project_tags = tags.tags_of(project);
        out.push_str(&project_card(project, centers.get(&project.center_id), &project_tags));
        out.push('\n');
    }
    out
}
