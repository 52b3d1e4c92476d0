use iced::{
    Element, Length, Task,
    widget::{button, row, text},
};
use tracing::{info, warn};

use crate::{
    api::{AccountRepository, ApiClient},
    gui::{
        AppState, Message,
        screens::{ParentMessage, ScreenData},
        state::Notice,
        widgets::{layout, notice_banner},
    },
    routes::{Route, redirect_after_unauthorized},
};

pub struct UnilinkApp {
    state: AppState,
    screen: ScreenData,
}

impl UnilinkApp {
    pub fn new(client: ApiClient) -> (Self, Task<Message>) {
        let mut state = AppState::new(client);
        let (screen, task) = ScreenData::open(Route::Projects, &mut state);
        (Self { state, screen }, task)
    }

    pub fn title(&self) -> String {
        format!("Unilink - {}", self.state.route)
    }

    fn navigate(&mut self, route: Route) -> Task<Message> {
        let (screen, task) = ScreenData::open(route, &mut self.state);
        if self.state.route != route {
            info!(requested = %route, landed = %self.state.route, "Navigation redirected.");
        }
        self.screen = screen;
        task
    }

    fn handle_parent(&mut self, message: ParentMessage) -> Task<Message> {
        match message {
            ParentMessage::Navigate(route) => self.navigate(route),
            ParentMessage::Notify(notice) => {
                self.state.notice = Some(notice);
                Task::none()
            }
            ParentMessage::SignedIn => {
                info!("Session established.");
                Task::none()
            }
            ParentMessage::SessionEnded => {
                self.state.notice =
                    Some(Notice::error("Your session has ended. Please sign in again."));
                match redirect_after_unauthorized(&self.state.route) {
                    Some(route) => self.navigate(route),
                    None => Task::none(),
                }
            }
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => {
                self.state.notice = None;
                self.navigate(route)
            }
            Message::Parent(parent) => self.handle_parent(parent),
            Message::Logout => {
                if let Err(e) = self.state.client.logout() {
                    warn!(error = %e, "Could not clear the stored session.");
                }
                self.state.notice = Some(Notice::success("Signed out."));
                self.navigate(Route::Projects)
            }
            Message::DismissNotice => {
                self.state.notice = None;
                Task::none()
            }
            message => self.screen.update(message, &mut self.state),
        }
    }

    fn header(&self) -> Element<'_, Message> {
        let mut nav = row![
            text("Unilink").size(22).width(Length::Fill),
            button("Projects").on_press(Message::Navigate(Route::Projects)),
        ]
        .spacing(10);
        if self.state.is_authenticated() {
            nav = nav
                .push(button("New project").on_press(Message::Navigate(Route::NewProject)))
                .push(button("Sign out").on_press(Message::Logout));
        } else {
            nav = nav
                .push(button("Sign in").on_press(Message::Navigate(Route::Login)))
                .push(button("Sign up").on_press(Message::Navigate(Route::Signup)));
        }
        nav.into()
    }

    pub fn view(&self) -> Element<'_, Message> {
        let notice = self
            .state
            .notice
            .as_ref()
            .map(|notice| notice_banner(notice, Message::DismissNotice));
        layout(self.header(), notice, self.screen.view())
    }
}
