use iced::{
    Element, Length, Task,
    widget::{button, column, container, row, text, text_input},
};

use crate::{
    actions::authenticate,
    core::{Field, LoginForm},
    gui::{
        AppState,
        screens::{ParentMessage, Screen, ScreenMessage},
        state::{Failure, Notice},
        widgets::labeled,
    },
    routes::Route,
};

#[derive(Debug, Clone, Default)]
pub struct LoginScreen {
    form: LoginForm,
    submitting: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum LoginMessage {
    EmailChanged(String),
    PasswordChanged(String),
    Blur(Field),
    Submit,
    Finished(Result<(), Failure>),
    GoToSignup,
}

fn msg(message: LoginMessage) -> ScreenMessage<LoginScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl Screen for LoginScreen {
    type Message = LoginMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let errors = self.form.errors();
        let mut page = column![
            text("Sign in").size(28),
            labeled(
                "Email",
                text_input("you@university.edu", &self.form.email)
                    .on_input(|value| msg(LoginMessage::EmailChanged(value)))
                    .on_submit(msg(LoginMessage::Blur(Field::Email))),
                errors,
                Field::Email,
            ),
            labeled(
                "Password",
                text_input("Password", &self.form.password)
                    .secure(true)
                    .on_input(|value| msg(LoginMessage::PasswordChanged(value)))
                    .on_submit(msg(LoginMessage::Submit)),
                errors,
                Field::Password,
            ),
        ]
        .spacing(14)
        .max_width(420);
        if let Some(error) = &self.error {
            page = page.push(text(error.as_str()));
        }
        page = page.push(
            row![
                button(if self.submitting { "Signing in..." } else { "Sign in" })
                    .on_press_maybe((!self.submitting).then_some(msg(LoginMessage::Submit))),
                button("Create an account").on_press(msg(LoginMessage::GoToSignup)),
            ]
            .spacing(10),
        );
        container(page).center_x(Length::Fill).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            LoginMessage::EmailChanged(value) => {
                self.form.email = value;
                Task::none()
            }
            LoginMessage::PasswordChanged(value) => {
                // Typing the password means the email field was left.
                if !self.form.email.trim().is_empty() {
                    self.form.blur(Field::Email);
                }
                self.form.password = value;
                Task::none()
            }
            LoginMessage::Blur(field) => {
                self.form.blur(field);
                Task::none()
            }
            LoginMessage::Submit => {
                if self.submitting {
                    return Task::none();
                }
                let Ok(credentials) = self.form.submit() else {
                    return Task::none();
                };
                self.submitting = true;
                self.error = None;
                let client = state.client.clone();
                Task::perform(
                    async move {
                        authenticate(&client, credentials, None)
                            .await
                            .map(|_| ())
                            .map_err(Failure::from)
                    },
                    |result| msg(LoginMessage::Finished(result)),
                )
            }
            LoginMessage::Finished(Ok(())) => {
                self.submitting = false;
                Task::done(ScreenMessage::ParentMessage(ParentMessage::SignedIn))
                    .chain(Task::done(ScreenMessage::ParentMessage(ParentMessage::Navigate(
                        Route::Projects,
                    ))))
                    .chain(Task::done(ScreenMessage::ParentMessage(ParentMessage::Notify(
                        Notice::success("Signed in."),
                    ))))
            }
            LoginMessage::Finished(Err(failure)) => {
                // A 401 here means bad credentials; staying on this view
                // keeps the redirect from looping.
                self.submitting = false;
                self.error = Some(failure.message);
                Task::none()
            }
            LoginMessage::GoToSignup => Task::done(ScreenMessage::ParentMessage(
                ParentMessage::Navigate(Route::Signup),
            )),
        }
    }
}
