use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;
use uuid::Uuid;

use crate::models::Project;

static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[1-5][0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .expect("uuid pattern is valid")
});

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_DESCRIPTION_LEN: usize = 10;
pub const MIN_TEAM_SIZE: i64 = 1;
pub const MIN_SIGNUP_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Description,
    CenterId,
    OwnerId,
    ImgUrl,
    TeamSize,
    ValidForCreation,
    Email,
    Password,
    ConfirmPassword,
}

/// Per-field messages shown next to the offending input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn set(&mut self, field: Field, outcome: Option<String>) {
        match outcome {
            Some(message) => {
                self.0.insert(field, message);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", messages.join(" "))
    }
}

impl std::error::Error for FieldErrors {}

pub fn is_identifier(value: &str) -> bool {
    UUID_RE.is_match(value)
}

pub fn is_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn min_chars(value: &str, min: usize, message: &str) -> Option<String> {
    (value.chars().count() < min).then(|| message.to_string())
}

/// Raw, as-typed values of the create/edit project form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    pub center_id: String,
    pub owner_id: String,
    pub open_for_applications: bool,
    pub img_url: String,
    pub team_size: String,
    pub valid_for_creation: bool,
    errors: FieldErrors,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidProject {
    pub name: String,
    pub description: String,
    pub center_id: Uuid,
    pub owner_id: Uuid,
    pub open_for_applications: bool,
    pub img_url: String,
    pub team_size: u32,
}

impl Default for ProjectForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            center_id: String::new(),
            owner_id: String::new(),
            open_for_applications: false,
            img_url: String::new(),
            team_size: MIN_TEAM_SIZE.to_string(),
            valid_for_creation: true,
            errors: FieldErrors::default(),
        }
    }
}

impl ProjectForm {
    pub const FIELDS: [Field; 7] = [
        Field::Name,
        Field::Description,
        Field::CenterId,
        Field::OwnerId,
        Field::ImgUrl,
        Field::TeamSize,
        Field::ValidForCreation,
    ];

    pub fn from_project(project: &Project) -> Self {
        Self {
            name: project.name.clone(),
            description: project.description.clone(),
            center_id: project.center_id.to_string(),
            owner_id: project.owner_id.to_string(),
            open_for_applications: project.open_for_applications,
            img_url: project.img_url.clone(),
            team_size: project.team_size.to_string(),
            valid_for_creation: true,
            errors: FieldErrors::default(),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Re-validates a single field, as when it loses focus.
    pub fn blur(&mut self, field: Field) {
        let outcome = self.check(field);
        self.errors.set(field, outcome);
    }

    /// Validates every field. Errors are kept on the form for display and
    /// also returned so the caller can refuse to submit.
    pub fn submit(&mut self) -> Result<ValidProject, FieldErrors> {
        for field in Self::FIELDS {
            self.blur(field);
        }
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        // Rules above guarantee these conversions succeed.
        let (Ok(center_id), Ok(owner_id), Ok(team_size)) = (
            self.center_id.parse::<Uuid>(),
            self.owner_id.parse::<Uuid>(),
            self.team_size.trim().parse::<u32>(),
        ) else {
            return Err(self.errors.clone());
        };
        Ok(ValidProject {
            name: self.name.clone(),
            description: self.description.clone(),
            center_id,
            owner_id,
            open_for_applications: self.open_for_applications,
            img_url: self.img_url.clone(),
            team_size,
        })
    }

    fn check(&self, field: Field) -> Option<String> {
        match field {
            Field::Name => {
                min_chars(&self.name, MIN_NAME_LEN, "Name must have at least 3 characters.")
            }
            Field::Description => min_chars(
                &self.description,
                MIN_DESCRIPTION_LEN,
                "Description must have at least 10 characters.",
            ),
            Field::CenterId => {
                (!is_identifier(&self.center_id)).then(|| "Select a valid center.".to_string())
            }
            Field::OwnerId => (!is_identifier(&self.owner_id))
                .then(|| "Enter a valid identifier for the owner.".to_string()),
            Field::ImgUrl => Url::parse(&self.img_url)
                .err()
                .map(|_| "Provide a valid image URL.".to_string()),
            Field::TeamSize => check_team_size(&self.team_size),
            Field::ValidForCreation => (!self.valid_for_creation)
                .then(|| "Project payload must be marked valid for creation.".to_string()),
            Field::Email | Field::Password | Field::ConfirmPassword => None,
        }
    }
}

fn check_team_size(raw: &str) -> Option<String> {
    match raw.trim().parse::<i64>() {
        Err(_) => Some("Team size must be a whole number.".to_string()),
        Ok(size) if size < MIN_TEAM_SIZE => Some("Minimum team size is 1.".to_string()),
        Ok(size) if u32::try_from(size).is_err() => Some("Team size is too large.".to_string()),
        Ok(_) => None,
    }
}

fn check_email(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        Some("Email is required.".to_string())
    } else if !is_email(email) {
        Some("Please enter a valid email address.".to_string())
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    errors: FieldErrors,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            errors: FieldErrors::default(),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn blur(&mut self, field: Field) {
        let outcome = match field {
            Field::Email => check_email(&self.email),
            Field::Password => self
                .password
                .trim()
                .is_empty()
                .then(|| "Password is required.".to_string()),
            _ => None,
        };
        self.errors.set(field, outcome);
    }

    pub fn submit(&mut self) -> Result<Credentials, FieldErrors> {
        self.blur(Field::Email);
        self.blur(Field::Password);
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        Ok(Credentials {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    errors: FieldErrors,
}

impl SignupForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            errors: FieldErrors::default(),
        }
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Confirmation equality is deliberately left to [`SignupForm::submit`].
    pub fn blur(&mut self, field: Field) {
        let outcome = match field {
            Field::Name => self.name.trim().is_empty().then(|| "Name is required.".to_string()),
            Field::Email => check_email(&self.email),
            Field::Password => min_chars(
                &self.password,
                MIN_SIGNUP_PASSWORD_LEN,
                "Password must be at least 6 characters.",
            ),
            Field::ConfirmPassword => self
                .confirm_password
                .is_empty()
                .then(|| "Please confirm your password.".to_string()),
            _ => None,
        };
        self.errors.set(field, outcome);
    }

    pub fn submit(&mut self) -> Result<NewAccount, FieldErrors> {
        for field in [Field::Name, Field::Email, Field::Password, Field::ConfirmPassword] {
            self.blur(field);
        }
        if self.errors.get(Field::ConfirmPassword).is_none()
            && self.password != self.confirm_password
        {
            self.errors
                .set(Field::ConfirmPassword, Some("Passwords do not match.".to_string()));
        }
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        Ok(NewAccount {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}
