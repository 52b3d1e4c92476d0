use iced::{
    Element, Length, Task,
    widget::{button, column, container, row, text, text_input},
};

use crate::{
    actions::register,
    core::{Field, SignupForm},
    gui::{
        AppState,
        screens::{ParentMessage, Screen, ScreenMessage},
        state::{Failure, Notice},
        widgets::labeled,
    },
    routes::Route,
};

#[derive(Debug, Clone, Default)]
pub struct SignupScreen {
    form: SignupForm,
    focused: Option<Field>,
    submitting: bool,
    error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SignupMessage {
    Changed(Field, String),
    Blur(Field),
    Submit,
    Finished(Result<(), Failure>),
    GoToLogin,
}

fn msg(message: SignupMessage) -> ScreenMessage<SignupScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl SignupScreen {
    fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.form.name,
            Field::Email => &self.form.email,
            Field::Password => &self.form.password,
            Field::ConfirmPassword => &self.form.confirm_password,
            _ => "",
        }
    }

    fn input<'a>(
        &'a self,
        label: &'a str,
        placeholder: &'a str,
        field: Field,
    ) -> Element<'a, ScreenMessage<Self>> {
        let secure = matches!(field, Field::Password | Field::ConfirmPassword);
        labeled(
            label,
            text_input(placeholder, self.value(field))
                .secure(secure)
                .on_input(move |value| msg(SignupMessage::Changed(field, value)))
                .on_submit(msg(SignupMessage::Blur(field))),
            self.form.errors(),
            field,
        )
    }
}

impl Screen for SignupScreen {
    type Message = SignupMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut page = column![
            text("Create an account").size(28),
            self.input("Name", "Your name", Field::Name),
            self.input("Email", "you@university.edu", Field::Email),
            self.input("Password", "At least 6 characters", Field::Password),
            self.input("Confirm password", "Repeat the password", Field::ConfirmPassword),
        ]
        .spacing(14)
        .max_width(420);
        if let Some(error) = &self.error {
            page = page.push(text(error.as_str()));
        }
        page = page.push(
            row![
                button(if self.submitting { "Creating..." } else { "Sign up" })
                    .on_press_maybe((!self.submitting).then_some(msg(SignupMessage::Submit))),
                button("I already have an account").on_press(msg(SignupMessage::GoToLogin)),
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
            SignupMessage::Changed(field, value) => {
                if let Some(previous) = self.focused.replace(field)
                    && previous != field
                {
                    self.form.blur(previous);
                }
                match field {
                    Field::Name => self.form.name = value,
                    Field::Email => self.form.email = value,
                    Field::Password => self.form.password = value,
                    Field::ConfirmPassword => self.form.confirm_password = value,
                    _ => {}
                }
                Task::none()
            }
            SignupMessage::Blur(field) => {
                self.form.blur(field);
                Task::none()
            }
            SignupMessage::Submit => {
                if self.submitting {
                    return Task::none();
                }
                self.focused = None;
                let Ok(account) = self.form.submit() else {
                    return Task::none();
                };
                self.submitting = true;
                self.error = None;
                let client = state.client.clone();
                Task::perform(
                    async move {
                        register(&client, account)
                            .await
                            .map(|_| ())
                            .map_err(Failure::from)
                    },
                    |result| msg(SignupMessage::Finished(result)),
                )
            }
            SignupMessage::Finished(Ok(())) => {
                self.submitting = false;
                Task::done(ScreenMessage::ParentMessage(ParentMessage::SignedIn))
                    .chain(Task::done(ScreenMessage::ParentMessage(ParentMessage::Navigate(
                        Route::Projects,
                    ))))
                    .chain(Task::done(ScreenMessage::ParentMessage(ParentMessage::Notify(
                        Notice::success("Account created. Welcome!"),
                    ))))
            }
            SignupMessage::Finished(Err(failure)) => {
                self.submitting = false;
                self.error = Some(failure.message);
                Task::none()
            }
            SignupMessage::GoToLogin => Task::done(ScreenMessage::ParentMessage(
                ParentMessage::Navigate(Route::Login),
            )),
        }
    }
}
