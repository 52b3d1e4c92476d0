mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from unilink for tests
pub use unilink::{
    actions::{self, SubmitError, SubmitTarget},
    api::{
        AccountRepository, ApiError, CatalogRepository, ProjectRepository, ProjectRequest,
        Session, SessionState, SessionStore,
    },
    core::{
        CenterCatalog, Field, LoginForm, ProjectForm, SignupForm, TagCatalog, TagSelectionSet,
        TagsEditor, filter_projects,
    },
    models::{Project, Tag, TagId},
};
