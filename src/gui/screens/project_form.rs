use iced::{
    Element, Length, Task,
    widget::{Row, button, column, pick_list, row, scrollable, text, text_input, toggler},
};
use uuid::Uuid;

use crate::{
    actions::{SubmitTarget, save_project},
    api::{CatalogRepository, ProjectRepository, ProjectRequest},
    core::{CenterCatalog, Field, ProjectForm, TagCatalog, TagSelectionSet, TagsEditor},
    gui::{
        AppState,
        screens::{
            Loadable, ParentMessage, Screen, ScreenMessage, escalate, session_check, settle,
        },
        state::{Failure, Notice},
        widgets::{labeled, load_error, loading, tag_chip},
    },
    models::{Center, Project, Tag, TagId},
    routes::Route,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Prefill {
    Ready,
    Loading,
    Missing,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ProjectFormScreen {
    target: SubmitTarget,
    form: ProjectForm,
    editor: TagsEditor,
    prefill: Prefill,
    tags: Loadable<TagCatalog>,
    centers: Loadable<CenterCatalog>,
    focused: Option<Field>,
    submitting: bool,
    submit_error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum ProjectFormMessage {
    TagsLoaded(Result<Vec<Tag>, Failure>),
    CentersLoaded(Result<Vec<Center>, Failure>),
    ProjectLoaded(Result<Option<Project>, Failure>),
    NameChanged(String),
    DescriptionChanged(String),
    OwnerChanged(String),
    ImgUrlChanged(String),
    TeamSizeChanged(String),
    OpenToggled(bool),
    CenterSelected(Center),
    Blur(Field),
    ToggleAdd(TagId),
    ToggleRemove(TagId),
    ClearAdd,
    ClearRemove,
    Submit,
    Saved(Result<Project, Failure>),
    Cancel,
    RetryTags,
    RetryCenters,
    RetryProject,
}

fn msg(message: ProjectFormMessage) -> ScreenMessage<ProjectFormScreen> {
    ScreenMessage::ScreenMessage(message)
}

fn parent(message: ParentMessage) -> Task<ScreenMessage<ProjectFormScreen>> {
    Task::done(ScreenMessage::ParentMessage(message))
}

impl ProjectFormScreen {
    pub fn new(target: SubmitTarget, state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let prefill = match target {
            SubmitTarget::Create => Prefill::Ready,
            SubmitTarget::Update(_) => Prefill::Loading,
        };
        let screen = Self {
            target,
            form: ProjectForm::default(),
            editor: TagsEditor::new(),
            prefill,
            tags: Loadable::Loading,
            centers: Loadable::Loading,
            focused: None,
            submitting: false,
            submit_error: None,
        };
        let mut tasks = vec![Self::fetch_tags(state), Self::fetch_centers(state)];
        if let SubmitTarget::Update(id) = target {
            tasks.push(Self::fetch_project(id, state));
        }
        (screen, Task::batch(tasks))
    }

    fn fetch_tags(state: &AppState) -> Task<ScreenMessage<Self>> {
        let client = state.client.clone();
        Task::perform(
            async move { client.get_tags().await.map_err(Failure::from) },
            |result| msg(ProjectFormMessage::TagsLoaded(result)),
        )
    }

    fn fetch_centers(state: &AppState) -> Task<ScreenMessage<Self>> {
        let client = state.client.clone();
        Task::perform(
            async move { client.get_centers().await.map_err(Failure::from) },
            |result| msg(ProjectFormMessage::CentersLoaded(result)),
        )
    }

    fn fetch_project(id: Uuid, state: &AppState) -> Task<ScreenMessage<Self>> {
        let client = state.client.clone();
        Task::perform(
            async move { client.get_project(id).await.map_err(Failure::from) },
            |result| msg(ProjectFormMessage::ProjectLoaded(result)),
        )
    }

    /// Inputs have no blur event, so moving to another field counts as
    /// leaving the previous one.
    fn focus(&mut self, field: Field) {
        if let Some(previous) = self.focused.replace(field)
            && previous != field
        {
            self.form.blur(previous);
        }
    }

    fn title(&self) -> &'static str {
        match self.target {
            SubmitTarget::Create => "New project",
            SubmitTarget::Update(_) => "Edit project",
        }
    }

    fn tag_picker<'a>(
        &'a self,
        label: &'a str,
        selected: &'a TagSelectionSet,
        on_toggle: fn(TagId) -> ProjectFormMessage,
        on_clear: ProjectFormMessage,
    ) -> Element<'a, ScreenMessage<Self>> {
        let chips: Element<'a, ScreenMessage<Self>> = match &self.tags {
            Loadable::Loading => loading("tags"),
            Loadable::Failed(message) => load_error(message, msg(ProjectFormMessage::RetryTags)),
            Loadable::Loaded(catalog) => Row::with_children(catalog.tags().iter().map(|tag| {
                tag_chip(tag, selected.contains(&tag.id), Some(msg(on_toggle(tag.id))))
            }))
            .spacing(6)
            .wrap()
            .into(),
        };
        column![
            row![
                text(label).size(14).width(Length::Fill),
                text(format!("{} selected", selected.len())).size(12),
                button("Clear").on_press_maybe((!selected.is_empty()).then_some(msg(on_clear))),
            ]
            .spacing(10),
            chips,
        ]
        .spacing(6)
        .into()
    }

    fn conflict_warning(&self) -> Option<Element<'_, ScreenMessage<Self>>> {
        let conflicts = self.editor.conflicts();
        if conflicts.is_empty() {
            return None;
        }
        let names: Vec<String> = conflicts
            .iter()
            .map(|id| {
                self.tags
                    .loaded()
                    .and_then(|catalog| catalog.get(id))
                    .map_or_else(|| id.to_string(), |tag| tag.name.clone())
            })
            .collect();
        Some(
            text(format!(
                "Both added and removed: {}. The backend decides which wins.",
                names.join(", ")
            ))
            .size(13)
            .into(),
        )
    }

    fn form_view(&self) -> Element<'_, ScreenMessage<Self>> {
        let errors = self.form.errors();
        let center_picker: Element<'_, ScreenMessage<Self>> = match &self.centers {
            Loadable::Loading => loading("centers"),
            Loadable::Failed(message) => load_error(message, msg(ProjectFormMessage::RetryCenters)),
            Loadable::Loaded(centers) => {
                let selected = Uuid::parse_str(&self.form.center_id)
                    .ok()
                    .and_then(|id| centers.get(&id));
                pick_list(centers.centers(), selected, |center| {
                    msg(ProjectFormMessage::CenterSelected(center))
                })
                .placeholder("Select a center")
                .width(Length::Fill)
                .into()
            }
        };

        let mut page = column![
            text(self.title()).size(28),
            labeled(
                "Name",
                text_input("Project name", &self.form.name)
                    .on_input(|value| msg(ProjectFormMessage::NameChanged(value)))
                    .on_submit(msg(ProjectFormMessage::Blur(Field::Name))),
                errors,
                Field::Name,
            ),
            labeled(
                "Description",
                text_input("What is the project about?", &self.form.description)
                    .on_input(|value| msg(ProjectFormMessage::DescriptionChanged(value)))
                    .on_submit(msg(ProjectFormMessage::Blur(Field::Description))),
                errors,
                Field::Description,
            ),
            labeled("Center", center_picker, errors, Field::CenterId),
            labeled(
                "Owner",
                text_input("Owner identifier", &self.form.owner_id)
                    .on_input(|value| msg(ProjectFormMessage::OwnerChanged(value)))
                    .on_submit(msg(ProjectFormMessage::Blur(Field::OwnerId))),
                errors,
                Field::OwnerId,
            ),
            labeled(
                "Image URL",
                text_input("https://", &self.form.img_url)
                    .on_input(|value| msg(ProjectFormMessage::ImgUrlChanged(value)))
                    .on_submit(msg(ProjectFormMessage::Blur(Field::ImgUrl))),
                errors,
                Field::ImgUrl,
            ),
            labeled(
                "Team size",
                text_input("1", &self.form.team_size)
                    .on_input(|value| msg(ProjectFormMessage::TeamSizeChanged(value)))
                    .on_submit(msg(ProjectFormMessage::Blur(Field::TeamSize))),
                errors,
                Field::TeamSize,
            ),
            toggler(self.form.open_for_applications)
                .label("Open for applications")
                .on_toggle(|open| msg(ProjectFormMessage::OpenToggled(open))),
            self.tag_picker(
                "Tags to add",
                self.editor.to_add(),
                ProjectFormMessage::ToggleAdd,
                ProjectFormMessage::ClearAdd,
            ),
            self.tag_picker(
                "Tags to remove",
                self.editor.to_remove(),
                ProjectFormMessage::ToggleRemove,
                ProjectFormMessage::ClearRemove,
            ),
        ]
        .spacing(14);

        if let Some(warning) = self.conflict_warning() {
            page = page.push(warning);
        }
        if let Some(error) = &self.submit_error {
            page = page.push(text(error.as_str()));
        }
        let submit_label = if self.submitting { "Saving..." } else { "Save" };
        page = page.push(
            row![
                button(submit_label)
                    .on_press_maybe((!self.submitting).then_some(msg(ProjectFormMessage::Submit))),
                button("Cancel").on_press(msg(ProjectFormMessage::Cancel)),
            ]
            .spacing(10),
        );
        scrollable(page.padding(4)).height(Length::Fill).into()
    }
}

impl Screen for ProjectFormScreen {
    type Message = ProjectFormMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match &self.prefill {
            Prefill::Ready => self.form_view(),
            Prefill::Loading => loading("project"),
            Prefill::Missing => column![
                text("Project not found").size(28),
                button("Back to projects").on_press(msg(ProjectFormMessage::Cancel)),
            ]
            .spacing(12)
            .into(),
            Prefill::Failed(message) => load_error(message, msg(ProjectFormMessage::RetryProject)),
        }
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            ProjectFormMessage::TagsLoaded(result) => {
                escalate(settle(&mut self.tags, result.map(TagCatalog::new)))
            }
            ProjectFormMessage::CentersLoaded(result) => {
                escalate(settle(&mut self.centers, result.map(CenterCatalog::new)))
            }
            ProjectFormMessage::ProjectLoaded(result) => match result {
                Ok(Some(project)) => {
                    self.form = ProjectForm::from_project(&project);
                    self.editor = TagsEditor::for_project(&project);
                    self.prefill = Prefill::Ready;
                    Task::none()
                }
                Ok(None) => {
                    self.prefill = Prefill::Missing;
                    Task::none()
                }
                Err(failure) => {
                    let task = escalate(session_check(&failure));
                    self.prefill = Prefill::Failed(failure.message);
                    task
                }
            },
            ProjectFormMessage::NameChanged(value) => {
                self.focus(Field::Name);
                self.form.name = value;
                Task::none()
            }
            ProjectFormMessage::DescriptionChanged(value) => {
                self.focus(Field::Description);
                self.form.description = value;
                Task::none()
            }
            ProjectFormMessage::OwnerChanged(value) => {
                self.focus(Field::OwnerId);
                self.form.owner_id = value;
                Task::none()
            }
            ProjectFormMessage::ImgUrlChanged(value) => {
                self.focus(Field::ImgUrl);
                self.form.img_url = value;
                Task::none()
            }
            ProjectFormMessage::TeamSizeChanged(value) => {
                self.focus(Field::TeamSize);
                self.form.team_size = value;
                Task::none()
            }
            ProjectFormMessage::OpenToggled(open) => {
                self.form.open_for_applications = open;
                Task::none()
            }
            ProjectFormMessage::CenterSelected(center) => {
                self.form.center_id = center.id.to_string();
                self.form.blur(Field::CenterId);
                Task::none()
            }
            ProjectFormMessage::Blur(field) => {
                self.form.blur(field);
                Task::none()
            }
            ProjectFormMessage::ToggleAdd(id) => {
                self.editor.toggle_add(id);
                Task::none()
            }
            ProjectFormMessage::ToggleRemove(id) => {
                self.editor.toggle_remove(id);
                Task::none()
            }
            ProjectFormMessage::ClearAdd => {
                self.editor.clear_add();
                Task::none()
            }
            ProjectFormMessage::ClearRemove => {
                self.editor.clear_remove();
                Task::none()
            }
            ProjectFormMessage::Submit => {
                if self.submitting {
                    return Task::none();
                }
                self.focused = None;
                let Ok(valid) = self.form.submit() else {
                    return Task::none();
                };
                self.submitting = true;
                self.submit_error = None;
                let request = ProjectRequest::new(valid, &self.editor);
                let client = state.client.clone();
                let target = self.target;
                Task::perform(
                    async move {
                        save_project(&client, &request, target)
                            .await
                            .map_err(Failure::from)
                    },
                    |result| msg(ProjectFormMessage::Saved(result)),
                )
            }
            ProjectFormMessage::Saved(Ok(project)) => {
                self.submitting = false;
                parent(ParentMessage::Navigate(Route::ProjectDetail(project.id)))
                    .chain(parent(ParentMessage::Notify(Notice::success("Project saved."))))
            }
            ProjectFormMessage::Saved(Err(failure)) => {
                self.submitting = false;
                let task = escalate(session_check(&failure));
                self.submit_error = Some(failure.message);
                task
            }
            ProjectFormMessage::Cancel => {
                let route = match (self.target, &self.prefill) {
                    (SubmitTarget::Update(id), Prefill::Ready) => Route::ProjectDetail(id),
                    _ => Route::Projects,
                };
                parent(ParentMessage::Navigate(route))
            }
            ProjectFormMessage::RetryTags => {
                self.tags = Loadable::Loading;
                Self::fetch_tags(state)
            }
            ProjectFormMessage::RetryCenters => {
                self.centers = Loadable::Loading;
                Self::fetch_centers(state)
            }
            ProjectFormMessage::RetryProject => match self.target {
                SubmitTarget::Update(id) => {
                    self.prefill = Prefill::Loading;
                    Self::fetch_project(id, state)
                }
                SubmitTarget::Create => Task::none(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeSet, sync::Arc};

    use super::*;
    use crate::api::{ApiClient, SessionState};

    fn app_state() -> AppState {
        let session = Arc::new(SessionState::ephemeral());
        AppState::new(ApiClient::new("http://127.0.0.1:9", session).expect("client builds"))
    }

    fn outage() -> Failure {
        Failure {
            message: "Bad Gateway".to_string(),
            unauthorized: false,
        }
    }

    #[test]
    fn retrying_centers_keeps_what_was_typed() {
        let mut state = app_state();
        let (mut screen, _) = ProjectFormScreen::new(SubmitTarget::Create, &state);
        let tag = Uuid::new_v4();
        let _ = screen.update(ProjectFormMessage::TagsLoaded(Ok(Vec::new())), &mut state);
        let _ = screen.update(ProjectFormMessage::NameChanged("Observatório".into()), &mut state);
        let _ = screen.update(ProjectFormMessage::TeamSizeChanged("4".into()), &mut state);
        let _ = screen.update(ProjectFormMessage::ToggleAdd(tag), &mut state);
        let _ = screen.update(ProjectFormMessage::CentersLoaded(Err(outage())), &mut state);
        assert!(matches!(screen.centers, Loadable::Failed(_)));

        let _ = screen.update(ProjectFormMessage::RetryCenters, &mut state);

        assert!(matches!(screen.centers, Loadable::Loading));
        assert!(matches!(screen.tags, Loadable::Loaded(_)));
        assert_eq!(screen.form.name, "Observatório");
        assert_eq!(screen.form.team_size, "4");
        assert!(screen.editor.to_add().contains(&tag));
    }

    #[test]
    fn retrying_tags_on_edit_keeps_the_loaded_project() {
        let mut state = app_state();
        let id = Uuid::new_v4();
        let project = Project {
            id,
            name: "Horta Urbana".to_string(),
            description: "Sensores na horta".to_string(),
            center_id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            open_for_applications: true,
            img_url: String::new(),
            team_size: 3,
            tag_ids: BTreeSet::from([Uuid::new_v4()]),
        };
        let (mut screen, _) = ProjectFormScreen::new(SubmitTarget::Update(id), &state);
        let _ = screen.update(ProjectFormMessage::ProjectLoaded(Ok(Some(project))), &mut state);
        let _ = screen.update(ProjectFormMessage::NameChanged("Horta 2".into()), &mut state);
        let _ = screen.update(ProjectFormMessage::TagsLoaded(Err(outage())), &mut state);

        let _ = screen.update(ProjectFormMessage::RetryTags, &mut state);

        assert!(matches!(screen.tags, Loadable::Loading));
        assert_eq!(screen.prefill, Prefill::Ready);
        assert_eq!(screen.form.name, "Horta 2");
        assert_eq!(screen.editor.to_add().len(), 1);
    }
}
