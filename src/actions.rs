//! User-triggered operations that combine form validation with API calls.
//!
//! Validation failures never reach the network.

use thiserror::Error;
use tracing::info;

use crate::{
    api::{
        AccountRepository, ApiError, CatalogRepository, CreateUserRequest, LoginBody,
        ProjectRepository, ProjectRequest, Session,
    },
    core::{
        CenterCatalog, Credentials, FieldErrors, LoginForm, NewAccount, ProjectForm, SignupForm,
        TagCatalog, TagsEditor,
    },
    models::{Project, ProjectId},
};

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Please fix the highlighted fields: {0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            SubmitError::Invalid(errors) => Some(errors),
            SubmitError::Api(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SubmitError::Api(e) if e.is_unauthorized())
    }
}

/// Outcome of fetching both catalogs; each side fails independently.
#[derive(Debug)]
pub struct CatalogLoad {
    pub tags: Result<TagCatalog, ApiError>,
    pub centers: Result<CenterCatalog, ApiError>,
}

/// Fetches tags and centers concurrently. Neither waits for the other.
pub async fn load_catalogs<R: CatalogRepository + Sync>(repo: &R) -> CatalogLoad {
    let (tags, centers) = tokio::join!(repo.get_tags(), repo.get_centers());
    CatalogLoad {
        tags: tags.map(TagCatalog::new),
        centers: centers.map(CenterCatalog::new),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(ProjectId),
}

/// Validates the form and, only if it passes, creates or updates the project.
pub async fn submit_project<R: ProjectRepository>(
    repo: &R,
    form: &mut ProjectForm,
    tags: &TagsEditor,
    target: SubmitTarget,
) -> Result<Project, SubmitError> {
    let valid = form.submit().map_err(SubmitError::Invalid)?;
    let request = ProjectRequest::new(valid, tags);
    Ok(save_project(repo, &request, target).await?)
}

pub async fn save_project<R: ProjectRepository>(
    repo: &R,
    request: &ProjectRequest,
    target: SubmitTarget,
) -> Result<Project, ApiError> {
    let project = match target {
        SubmitTarget::Create => repo.create_project(request).await?,
        SubmitTarget::Update(id) => repo.update_project(id, request).await?,
    };
    info!(project_id = %project.id, ?target, "Project saved.");
    Ok(project)
}

/// Logs in. A display name switches to the extended body the backend expects.
pub async fn sign_in<R: AccountRepository>(
    repo: &R,
    form: &mut LoginForm,
    name: Option<String>,
) -> Result<Session, SubmitError> {
    let credentials = form.submit().map_err(SubmitError::Invalid)?;
    Ok(authenticate(repo, credentials, name).await?)
}

pub async fn authenticate<R: AccountRepository>(
    repo: &R,
    credentials: Credentials,
    name: Option<String>,
) -> Result<Session, ApiError> {
    let body = match name.filter(|n| !n.trim().is_empty()) {
        Some(name) => LoginBody::extended(credentials, name),
        None => LoginBody::base(credentials),
    };
    repo.login(&body).await
}

/// Validates the signup form, then creates the account and logs in.
pub async fn sign_up<R: AccountRepository>(
    repo: &R,
    form: &mut SignupForm,
) -> Result<Session, SubmitError> {
    let account = form.submit().map_err(SubmitError::Invalid)?;
    Ok(register(repo, account).await?)
}

/// The login call is issued only after account creation succeeded.
pub async fn register<R: AccountRepository>(
    repo: &R,
    account: NewAccount,
) -> Result<Session, ApiError> {
    let name = account.name.clone();
    let credentials = Credentials {
        email: account.email.clone(),
        password: account.password.clone(),
    };
    let user = repo.create_user(&CreateUserRequest::from(account)).await?;
    info!(user_id = ?user.id, email = %user.email, "Account created.");
    repo.login(&LoginBody::extended(credentials, name)).await
}
