use iced::{
    Element, Task,
    widget::{Row, button, column, row, text},
};

use crate::{
    actions::{CatalogLoad, load_catalogs},
    api::ProjectRepository,
    core::{CenterCatalog, TagCatalog},
    gui::{
        AppState,
        screens::{
            Loadable, ParentMessage, Screen, ScreenMessage, escalate, session_check, settle,
        },
        state::Failure,
        widgets::{load_error, loading, tag_badge},
    },
    models::{Project, ProjectId},
    routes::Route,
    ui::components::center_name,
};

#[derive(Debug, Clone)]
pub struct ProjectDetailScreen {
    id: ProjectId,
    project: Loadable<Option<Project>>,
    tags: Option<TagCatalog>,
    centers: Option<CenterCatalog>,
    authenticated: bool,
}

#[derive(Debug, Clone)]
pub enum ProjectDetailMessage {
    ProjectLoaded(Result<Option<Project>, Failure>),
    CatalogsLoaded(Result<TagCatalog, Failure>, Result<CenterCatalog, Failure>),
    Back,
    Edit,
    Retry,
}

impl ProjectDetailScreen {
    pub fn new(id: ProjectId, state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let screen = Self {
            id,
            project: Loadable::Loading,
            tags: None,
            centers: None,
            authenticated: state.is_authenticated(),
        };
        let client = state.client.clone();
        let catalogs = Task::perform(
            async move {
                let CatalogLoad { tags, centers } = load_catalogs(&client).await;
                (tags.map_err(Failure::from), centers.map_err(Failure::from))
            },
            |(tags, centers)| {
                ScreenMessage::ScreenMessage(ProjectDetailMessage::CatalogsLoaded(tags, centers))
            },
        );
        (screen, Task::batch([Self::fetch(id, state), catalogs]))
    }

    fn fetch(id: ProjectId, state: &AppState) -> Task<ScreenMessage<Self>> {
        let client = state.client.clone();
        Task::perform(
            async move { client.get_project(id).await.map_err(Failure::from) },
            |result| ScreenMessage::ScreenMessage(ProjectDetailMessage::ProjectLoaded(result)),
        )
    }

    fn not_found(&self) -> Element<'_, ScreenMessage<Self>> {
        column![
            text("Project not found").size(28),
            text(format!("The project {} does not exist or was removed.", self.id)),
            button("Back to projects")
                .on_press(ScreenMessage::ScreenMessage(ProjectDetailMessage::Back)),
        ]
        .spacing(12)
        .into()
    }

    fn detail<'a>(&'a self, project: &'a Project) -> Element<'a, ScreenMessage<Self>> {
        let center = self
            .centers
            .as_ref()
            .and_then(|centers| centers.get(&project.center_id));
        let tags = self
            .tags
            .as_ref()
            .map(|catalog| catalog.tags_of(project))
            .unwrap_or_default();

        let mut actions = row![
            button("Back").on_press(ScreenMessage::ScreenMessage(ProjectDetailMessage::Back))
        ]
        .spacing(10);
        if self.authenticated {
            actions = actions.push(
                button("Edit").on_press(ScreenMessage::ScreenMessage(ProjectDetailMessage::Edit)),
            );
        }

        let mut page = column![actions, text(project.name.as_str()).size(28)].spacing(12);
        if project.open_for_applications {
            page = page.push(text("Open for applications!"));
        }
        page.push(text(project.description.as_str()))
            .push(text(format!("Center: {}", center_name(center))))
            .push(text(format!("Team size: {}", project.team_size)))
            .push(Row::with_children(tags.into_iter().map(|tag| tag_badge(tag))).spacing(4))
            .push(text(format!("Image: {}", project.img_url)).size(13))
            .into()
    }
}

impl Screen for ProjectDetailScreen {
    type Message = ProjectDetailMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match &self.project {
            Loadable::Loading => loading("project"),
            Loadable::Failed(message) => {
                load_error(message, ScreenMessage::ScreenMessage(ProjectDetailMessage::Retry))
            }
            Loadable::Loaded(None) => self.not_found(),
            Loadable::Loaded(Some(project)) => self.detail(project),
        }
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            ProjectDetailMessage::ProjectLoaded(result) => {
                escalate(settle(&mut self.project, result))
            }
            // The page degrades to ids and placeholders without catalogs.
            ProjectDetailMessage::CatalogsLoaded(tags, centers) => {
                let ended = [tags.as_ref().err(), centers.as_ref().err()]
                    .into_iter()
                    .flatten()
                    .find_map(session_check);
                self.tags = tags.ok();
                self.centers = centers.ok();
                escalate(ended)
            }
            ProjectDetailMessage::Back => {
                Task::done(ScreenMessage::ParentMessage(ParentMessage::Navigate(Route::Projects)))
            }
            ProjectDetailMessage::Edit => Task::done(ScreenMessage::ParentMessage(
                ParentMessage::Navigate(Route::EditProject(self.id)),
            )),
            ProjectDetailMessage::Retry => {
                self.project = Loadable::Loading;
                Self::fetch(self.id, state)
            }
        }
    }
}
