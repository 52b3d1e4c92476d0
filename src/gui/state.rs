use crate::{
    api::{ApiClient, ApiError},
    routes::Route,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Banner shown under the header until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Cloneable summary of a failed request, carried inside messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub message: String,
    pub unauthorized: bool,
}

impl From<ApiError> for Failure {
    fn from(error: ApiError) -> Self {
        Self {
            message: error.user_message(),
            unauthorized: error.is_unauthorized(),
        }
    }
}

#[derive(Debug)]
pub struct AppState {
    pub client: ApiClient,
    pub route: Route,
    pub notice: Option<Notice>,
}

impl AppState {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            route: Route::Projects,
            notice: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }
}
