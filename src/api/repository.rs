use std::future::Future;

use crate::{
    api::{
        ApiError,
        dto::{CreateUserRequest, LoginBody, ProjectRequest},
        session::Session,
    },
    models::{Center, Project, ProjectId, Tag, User},
};

pub trait CatalogRepository {
    fn get_tags(&self) -> impl Future<Output = Result<Vec<Tag>, ApiError>> + Send;
    fn get_centers(&self) -> impl Future<Output = Result<Vec<Center>, ApiError>> + Send;
}

pub trait ProjectRepository {
    fn get_projects(&self) -> impl Future<Output = Result<Vec<Project>, ApiError>> + Send;
    /// `Ok(None)` when the backend does not know the id.
    fn get_project(
        &self,
        id: ProjectId,
    ) -> impl Future<Output = Result<Option<Project>, ApiError>> + Send;
    fn create_project(
        &self,
        request: &ProjectRequest,
    ) -> impl Future<Output = Result<Project, ApiError>> + Send;
    fn update_project(
        &self,
        id: ProjectId,
        request: &ProjectRequest,
    ) -> impl Future<Output = Result<Project, ApiError>> + Send;
}

pub trait AccountRepository {
    /// Logs in and establishes the returned session.
    fn login(&self, body: &LoginBody) -> impl Future<Output = Result<Session, ApiError>> + Send;
    fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> impl Future<Output = Result<User, ApiError>> + Send;
    fn logout(&self) -> Result<(), ApiError>;
    fn is_authenticated(&self) -> bool;
}
