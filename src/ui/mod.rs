//! Plain-text rendering of the listing, detail, and form views for the
//! command line.

pub mod components;
pub mod home;
pub mod layout;
pub mod project;

pub use home::{filter_bar, project_listing};
pub use layout::layout;
pub use project::{field_errors, not_found, project_detail};
