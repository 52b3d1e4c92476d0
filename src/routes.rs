use std::fmt;

use crate::models::ProjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Projects,
    ProjectDetail(ProjectId),
    NewProject,
    EditProject(ProjectId),
    Login,
    Signup,
}

impl Route {
    /// Routes that need a live session.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::NewProject | Route::EditProject(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Projects => write!(f, "/"),
            Route::ProjectDetail(id) => write!(f, "/projects/{id}"),
            Route::NewProject => write!(f, "/projects/new"),
            Route::EditProject(id) => write!(f, "/projects/{id}/edit"),
            Route::Login => write!(f, "/login"),
            Route::Signup => write!(f, "/signup"),
        }
    }
}

/// Where navigation actually lands: protected routes bounce to the login
/// view when there is no session.
pub fn guard(route: Route, authenticated: bool) -> Route {
    if route.is_protected() && !authenticated {
        Route::Login
    } else {
        route
    }
}

/// Forced navigation after a 401. Nothing happens when the user is
/// already on the login view, which keeps the redirect from looping.
pub fn redirect_after_unauthorized(current: &Route) -> Option<Route> {
    match current {
        Route::Login => None,
        _ => Some(Route::Login),
    }
}
