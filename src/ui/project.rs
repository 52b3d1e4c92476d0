use std::fmt::Write;

use crate::{
    core::{CenterCatalog, FieldErrors, TagCatalog},
    models::{Project, ProjectId},
    routes::Route,
    ui::components::center_name,
};

pub fn project_detail(project: &Project, tags: &TagCatalog, centers: &CenterCatalog) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", project.name);
    if project.open_for_applications {
        let _ = writeln!(out, "Open for applications!");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", project.description);
    let _ = writeln!(out);
    let _ = writeln!(out, "Center:    {}", center_name(centers.get(&project.center_id)));
    let _ = writeln!(out, "Team size: {}", project.team_size);
    let _ = writeln!(out, "Image:     {}", project.img_url);
    let names: Vec<&str> = tags.tags_of(project).iter().map(|t| t.name.as_str()).collect();
    if !names.is_empty() {
        let _ = writeln!(out, "Tags:      {}", names.join(", "));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Back to projects: {}", Route::Projects);
    out
}

pub fn not_found(id: &ProjectId) -> String {
    format!(
        "Project not found\nThe project {id} does not exist or was removed.\n\
         Back to projects: {}\n",
        Route::Projects
    )
}

pub fn field_errors(errors: &FieldErrors) -> String {
    let mut out = String::new();
    for (field, message) in errors.iter() {
        let _ = writeln!(out, "  {field:?}: {message}");
    }
    out
}
