pub mod actions;
pub mod api;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod telemetry;
pub mod ui;

pub use api::{ApiClient, ApiError, SessionState, SessionStore};
pub use config::Settings;
pub use core::{TagCatalog, TagSelectionSet, TagsEditor, filter_projects};
pub use models::{Center, Project, Tag};
pub use routes::Route;

#[cfg(feature = "gui")]
pub mod gui;
