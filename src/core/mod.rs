pub mod catalog;
pub mod color;
pub mod editor;
pub mod filter;
pub mod form;
pub mod selection;

pub use catalog::{CenterCatalog, OneOrMany, TagCatalog};
pub use color::{Color, Rgba, TextTone};
pub use editor::TagsEditor;
pub use filter::{filter_projects, matches_selection};
pub use form::{
    Credentials, Field, FieldErrors, LoginForm, NewAccount, ProjectForm, SignupForm, ValidProject,
};
pub use selection::TagSelectionSet;
