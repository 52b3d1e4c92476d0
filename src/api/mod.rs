pub mod dto;
mod error;
mod repository;
pub mod session;

use std::{sync::Arc, time::Duration};

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    config::Settings,
    core::OneOrMany,
    models::{Center, Project, ProjectId, Tag, User},
};

pub use dto::{CreateUserRequest, LoginBody, LoginResponse, ProjectRequest};
pub use error::{ApiError, FALLBACK_MESSAGE, backend_message};
pub use repository::{AccountRepository, CatalogRepository, ProjectRepository};
pub use session::{SESSION_TTL, Session, SessionState, SessionStore};

/// HTTP client for the projects backend.
///
/// Cloning is cheap; clones share the connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionState>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionState>) -> anyhow::Result<Self> {
        Self::with_timeout(base_url, session, Duration::from_secs(30))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        session: Arc<SessionState>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn from_settings(settings: &Settings, session: Arc<SessionState>) -> anyhow::Result<Self> {
        Self::with_timeout(
            settings.api_base_url.clone(),
            session,
            Duration::from_secs(settings.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends the request and maps non-success statuses onto [`ApiError`].
    ///
    /// A 401 from any endpoint tears the session down before returning.
    async fn send(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(%method, path, status = status.as_u16(), "API response.");
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = backend_message(status, &body);
        match status {
            StatusCode::UNAUTHORIZED => {
                warn!(path, "Backend rejected credentials; clearing session.");
                if let Err(e) = self.session.clear() {
                    warn!(error = %e, "Could not remove the stored session.");
                }
                Err(ApiError::Unauthorized(message))
            }
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(message)),
            _ => Err(ApiError::Backend { status, message }),
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, self.request(Method::GET, path)).await?;
        Self::decode(response).await
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method.clone(), path).json(body);
        let response = self.send(method, path, builder).await?;
        Self::decode(response).await
    }

    /// Fetches a collection endpoint that may answer with a bare object.
    async fn get_collection<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let items: OneOrMany<T> = self.get_json(path).await?;
        Ok(items.into_vec())
    }
}

impl CatalogRepository for ApiClient {
    async fn get_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.get_collection("/api/tags").await
    }

    async fn get_centers(&self) -> Result<Vec<Center>, ApiError> {
        self.get_collection("/api/centers").await
    }
}

impl ProjectRepository for ApiClient {
    async fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_collection("/api/projects").await
    }

    async fn get_project(&self, id: ProjectId) -> Result<Option<Project>, ApiError> {
        match self.get_json(&format!("/api/projects/{id}")).await {
            Ok(project) => Ok(Some(project)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_project(&self, request: &ProjectRequest) -> Result<Project, ApiError> {
        self.send_json(Method::POST, "/api/projects", request).await
    }

    async fn update_project(
        &self,
        id: ProjectId,
        request: &ProjectRequest,
    ) -> Result<Project, ApiError> {
        self.send_json(Method::PUT, &format!("/api/projects/{id}"), request)
            .await
    }
}

impl AccountRepository for ApiClient {
    async fn login(&self, body: &LoginBody) -> Result<Session, ApiError> {
        let response: LoginResponse = self.send_json(Method::POST, "/api/auth/login", body).await?;
        let session = Session::issued_now(response.token);
        self.session.establish(session.clone())?;
        debug!(email = body.email(), "Logged in.");
        Ok(session)
    }

    /// The created account is only informational; an unexpected body does
    /// not fail the signup once the backend accepted it.
    async fn create_user(&self, request: &CreateUserRequest) -> Result<User, ApiError> {
        let builder = self.request(Method::POST, "/api/users").json(request);
        let body = self.send(Method::POST, "/api/users", builder).await?.text().await?;
        Ok(serde_json::from_str(&body).unwrap_or_else(|e| {
            debug!(error = %e, "Unrecognized account body.");
            User::default()
        }))
    }

    fn logout(&self) -> Result<(), ApiError> {
        self.session.clear()?;
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}
