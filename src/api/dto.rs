use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    core::{Credentials, NewAccount, TagsEditor, ValidProject},
    models::{Role, TagId},
};

/// Body of both `POST /api/projects` and `PUT /api/projects/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub name: String,
    pub description: String,
    pub center_id: Uuid,
    pub owner_id: Uuid,
    pub open_for_applications: bool,
    pub img_url: String,
    pub team_size: u32,
    pub tags_to_be_added: Vec<TagId>,
    pub tags_to_be_removed: Vec<TagId>,
    pub valid_for_creation: bool,
}

impl ProjectRequest {
    pub fn new(project: ValidProject, tags: &TagsEditor) -> Self {
        Self {
            name: project.name,
            description: project.description,
            center_id: project.center_id,
            owner_id: project.owner_id,
            open_for_applications: project.open_for_applications,
            img_url: project.img_url,
            team_size: project.team_size,
            tags_to_be_added: tags.to_add().to_vec(),
            tags_to_be_removed: tags.to_remove().to_vec(),
            valid_for_creation: true,
        }
    }
}

/// Login payload. The backend currently insists on the extended shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum LoginBody {
    Base {
        email: String,
        password: String,
    },
    #[serde(rename_all = "camelCase")]
    Extended {
        email: String,
        password: String,
        name: String,
        role: Role,
        valid_for_creation: bool,
    },
}

impl LoginBody {
    pub fn base(credentials: Credentials) -> Self {
        LoginBody::Base {
            email: credentials.email,
            password: credentials.password,
        }
    }

    pub fn extended(credentials: Credentials, name: impl Into<String>) -> Self {
        LoginBody::Extended {
            email: credentials.email,
            password: credentials.password,
            name: name.into(),
            role: Role::ProjectAdmin,
            valid_for_creation: true,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            LoginBody::Base { email, .. } | LoginBody::Extended { email, .. } => email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub valid_for_creation: bool,
}

impl From<NewAccount> for CreateUserRequest {
    fn from(account: NewAccount) -> Self {
        Self {
            name: account.name,
            email: account.email,
            password: account.password,
            role: Role::ProjectAdmin,
            valid_for_creation: true,
        }
    }
}
