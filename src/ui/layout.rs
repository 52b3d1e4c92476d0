use crate::routes::Route;

/// Wraps a view with the header navigation shown on every page.
pub fn layout(title: &str, body: &str, authenticated: bool) -> String {
    let nav = if authenticated {
        format!("Projects {}  |  New project {}", Route::Projects, Route::NewProject)
    } else {
        format!("Projects {}  |  Sign in {}", Route::Projects, Route::Login)
    };
    let rule = "─".repeat(title.chars().count().max(nav.chars().count()));
    format!("{nav}\n{rule}\n{title}\n\n{body}")
}
