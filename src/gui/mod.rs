mod app;
mod message;
mod screens;
mod state;
mod widgets;

pub use app::UnilinkApp;
pub use message::Message;
pub use state::AppState;

use crate::api::ApiClient;

/// Opens the desktop window on the project listing.
pub fn run(client: ApiClient) -> anyhow::Result<()> {
    iced::application(
        move || UnilinkApp::new(client.clone()),
        UnilinkApp::update,
        UnilinkApp::view,
    )
    .title(UnilinkApp::title)
    .run()?;
    Ok(())
}
