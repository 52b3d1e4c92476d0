pub mod login;
pub mod project_detail;
pub mod project_form;
pub mod project_list;
pub mod signup;

use iced::{Element, Task};

use crate::{
    actions::SubmitTarget,
    gui::{
        AppState, Message,
        state::{Failure, Notice},
    },
    routes::{Route, guard},
};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug;
    type ParentMessage: std::fmt::Debug;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

/// Requests a screen makes of the application shell.
#[derive(Debug, Clone)]
pub enum ParentMessage {
    Navigate(Route),
    Notify(Notice),
    /// The backend answered 401; the session is already gone.
    SessionEnded,
    SignedIn,
}

/// Per-resource fetch state, so one failing request does not blank the page.
#[derive(Debug, Clone)]
pub enum Loadable<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Loadable::Loading
    }
}

impl<T> Loadable<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Loadable::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

/// Stores a fetch outcome in its slot. A 401 on any resource yields the
/// request to end the session.
pub(crate) fn settle<T>(
    slot: &mut Loadable<T>,
    result: Result<T, Failure>,
) -> Option<ParentMessage> {
    match result {
        Ok(value) => {
            *slot = Loadable::Loaded(value);
            None
        }
        Err(failure) => {
            let ended = session_check(&failure);
            *slot = Loadable::Failed(failure.message);
            ended
        }
    }
}

pub(crate) fn session_check(failure: &Failure) -> Option<ParentMessage> {
    failure.unauthorized.then_some(ParentMessage::SessionEnded)
}

/// Forwards an optional request to the shell.
pub(crate) fn escalate<S>(message: Option<ParentMessage>) -> Task<ScreenMessage<S>>
where
    S: Screen<ParentMessage = ParentMessage>,
    ScreenMessage<S>: Send + 'static,
{
    match message {
        Some(message) => Task::done(ScreenMessage::ParentMessage(message)),
        None => Task::none(),
    }
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    ProjectList(project_list::ProjectListScreen),
    ProjectDetail(project_detail::ProjectDetailScreen),
    ProjectForm(project_form::ProjectFormScreen),
    Login(login::LoginScreen),
    Signup(signup::SignupScreen),
}

impl ScreenData {
    /// Builds the screen for a route after the auth guard has had its say,
    /// along with the fetches it starts on entry.
    pub fn open(route: Route, state: &mut AppState) -> (Self, Task<Message>) {
        let route = guard(route, state.is_authenticated());
        state.route = route;
        match route {
            Route::Projects => {
                let (screen, task) = project_list::ProjectListScreen::new(state);
                (ScreenData::ProjectList(screen), task.map(Message::ProjectList))
            }
            Route::ProjectDetail(id) => {
                let (screen, task) = project_detail::ProjectDetailScreen::new(id, state);
                (ScreenData::ProjectDetail(screen), task.map(Message::ProjectDetail))
            }
            Route::NewProject => {
                let (screen, task) =
                    project_form::ProjectFormScreen::new(SubmitTarget::Create, state);
                (ScreenData::ProjectForm(screen), task.map(Message::ProjectForm))
            }
            Route::EditProject(id) => {
                let (screen, task) =
                    project_form::ProjectFormScreen::new(SubmitTarget::Update(id), state);
                (ScreenData::ProjectForm(screen), task.map(Message::ProjectForm))
            }
            Route::Login => (ScreenData::Login(login::LoginScreen::default()), Task::none()),
            Route::Signup => (ScreenData::Signup(signup::SignupScreen::default()), Task::none()),
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self {
            ScreenData::ProjectList(screen) => screen.view().map(Message::ProjectList),
            ScreenData::ProjectDetail(screen) => screen.view().map(Message::ProjectDetail),
            ScreenData::ProjectForm(screen) => screen.view().map(Message::ProjectForm),
            ScreenData::Login(screen) => screen.view().map(Message::Login),
            ScreenData::Signup(screen) => screen.view().map(Message::Signup),
        }
    }

    /// Routes a screen message to the active screen. Replies addressed to a
    /// screen that is no longer shown are dropped.
    pub fn update(&mut self, message: Message, state: &mut AppState) -> Task<Message> {
        match (self, message) {
            (ScreenData::ProjectList(page), Message::ProjectList(msg)) => {
                dispatch(page, msg, state, Message::ProjectList)
            }
            (ScreenData::ProjectDetail(page), Message::ProjectDetail(msg)) => {
                dispatch(page, msg, state, Message::ProjectDetail)
            }
            (ScreenData::ProjectForm(page), Message::ProjectForm(msg)) => {
                dispatch(page, msg, state, Message::ProjectForm)
            }
            (ScreenData::Login(page), Message::Login(msg)) => {
                dispatch(page, msg, state, Message::Login)
            }
            (ScreenData::Signup(page), Message::Signup(msg)) => {
                dispatch(page, msg, state, Message::Signup)
            }
            _ => Task::none(),
        }
    }
}

fn dispatch<S>(
    page: &mut S,
    message: ScreenMessage<S>,
    state: &mut AppState,
    wrap: fn(ScreenMessage<S>) -> Message,
) -> Task<Message>
where
    S: Screen<ParentMessage = ParentMessage>,
    ScreenMessage<S>: Send + 'static,
{
    match message {
        ScreenMessage::ScreenMessage(msg) => page.update(msg, state).map(wrap),
        ScreenMessage::ParentMessage(parent) => Task::done(Message::Parent(parent)),
    }
}
