use iced::{
    Element, Length, Task,
    widget::{Column, Row, button, column, container, row, scrollable, text},
};

use crate::{
    api::{CatalogRepository, ProjectRepository},
    core::{CenterCatalog, TagCatalog, TagSelectionSet, filter_projects},
    gui::{
        AppState,
        screens::{Loadable, ParentMessage, Screen, ScreenMessage, escalate, settle},
        state::Failure,
        widgets::{load_error, loading, tag_badge, tag_chip},
    },
    models::{Center, Project, ProjectId, Tag, TagId},
    routes::Route,
    ui::components::{CARD_VISIBLE_TAGS, center_name},
};

#[derive(Debug, Clone, Default)]
pub struct ProjectListScreen {
    tags: Loadable<TagCatalog>,
    centers: Loadable<CenterCatalog>,
    projects: Loadable<Vec<Project>>,
    selected: TagSelectionSet,
}

#[derive(Debug, Clone)]
pub enum ProjectListMessage {
    TagsLoaded(Result<Vec<Tag>, Failure>),
    CentersLoaded(Result<Vec<Center>, Failure>),
    ProjectsLoaded(Result<Vec<Project>, Failure>),
    ToggleTag(TagId),
    ClearFilters,
    Open(ProjectId),
    RetryTags,
    RetryCenters,
    RetryProjects,
}

fn msg(message: ProjectListMessage) -> ScreenMessage<ProjectListScreen> {
    ScreenMessage::ScreenMessage(message)
}

impl ProjectListScreen {
    /// Tags, centers and projects load in parallel and settle independently.
    pub fn new(state: &AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let tasks = Task::batch([
            Self::fetch_tags(state),
            Self::fetch_centers(state),
            Self::fetch_projects(state),
        ]);
        (Self::default(), tasks)
    }

    fn fetch_tags(state: &AppState) -> Task<ScreenMessage<Self>> {
        let client = state.client.clone();
        Task::perform(
            async move { client.get_tags().await.map_err(Failure::from) },
            |result| msg(ProjectListMessage::TagsLoaded(result)),
        )
    }

    fn fetch_centers(state: &AppState) -> Task<ScreenMessage<Self>> {
        let client = state.client.clone();
        Task::perform(
            async move { client.get_centers().await.map_err(Failure::from) },
            |result| msg(ProjectListMessage::CentersLoaded(result)),
        )
    }

    fn fetch_projects(state: &AppState) -> Task<ScreenMessage<Self>> {
        let client = state.client.clone();
        Task::perform(
            async move { client.get_projects().await.map_err(Failure::from) },
            |result| msg(ProjectListMessage::ProjectsLoaded(result)),
        )
    }

    fn filter_bar(&self) -> Element<'_, ScreenMessage<Self>> {
        let catalog = match &self.tags {
            Loadable::Loading => return loading("tags"),
            Loadable::Failed(message) => {
                return load_error(message, msg(ProjectListMessage::RetryTags));
            }
            Loadable::Loaded(catalog) => catalog,
        };
        let chips = catalog.tags().iter().map(|tag| {
            tag_chip(
                tag,
                self.selected.contains(&tag.id),
                Some(msg(ProjectListMessage::ToggleTag(tag.id))),
            )
        });
        let clear = button("Clear filters").on_press_maybe(
            (!self.selected.is_empty()).then_some(msg(ProjectListMessage::ClearFilters)),
        );
        column![Row::with_children(chips).spacing(6).wrap(), clear]
            .spacing(10)
            .into()
    }

    fn card<'a>(&'a self, project: &'a Project) -> Element<'a, ScreenMessage<Self>> {
        let center = self
            .centers
            .loaded()
            .and_then(|centers| centers.get(&project.center_id));
        let tags = self
            .tags
            .loaded()
            .map(|catalog| catalog.tags_of(project))
            .unwrap_or_default();
        let hidden = tags.len().saturating_sub(CARD_VISIBLE_TAGS);
        let mut badges = Row::with_children(
            tags.into_iter()
                .take(CARD_VISIBLE_TAGS)
                .map(|tag| tag_badge(tag)),
        )
        .spacing(4);
        if hidden > 0 {
            badges = badges.push(text(format!("+{hidden}")).size(12));
        }

        let mut header = row![text(project.name.as_str()).size(20).width(Length::Fill)];
        if project.open_for_applications {
            header = header.push(text("Open").size(12));
        }
        let body = column![
            header,
            text(project.description.as_str()).size(14),
            text(format!(
                "{}  ·  Team of {}",
                center_name(center),
                project.team_size
            ))
            .size(13),
            badges,
        ]
        .spacing(6);

        button(container(body).padding(12).width(Length::Fill))
            .width(Length::Fill)
            .style(button::secondary)
            .on_press(msg(ProjectListMessage::Open(project.id)))
            .into()
    }

    fn listing(&self) -> Element<'_, ScreenMessage<Self>> {
        let projects = match &self.projects {
            Loadable::Loading => return loading("projects"),
            Loadable::Failed(message) => {
                return load_error(message, msg(ProjectListMessage::RetryProjects));
            }
            Loadable::Loaded(projects) => projects,
        };
        let visible = filter_projects(projects, &self.selected);
        if visible.is_empty() {
            return container(
                column![
                    text("No projects found.").size(18),
                    text("Try removing or changing the filters."),
                ]
                .spacing(6),
            )
            .padding(20)
            .into();
        }
        scrollable(Column::with_children(visible.into_iter().map(|p| self.card(p))).spacing(12))
            .height(Length::Fill)
            .into()
    }
}

impl Screen for ProjectListScreen {
    type Message = ProjectListMessage;
    type ParentMessage = ParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let mut page = column![text("Projects").size(28), self.filter_bar()].spacing(16);
        // Cards still render without centers, so the failure sits above them.
        if let Loadable::Failed(message) = &self.centers {
            page = page.push(load_error(message, msg(ProjectListMessage::RetryCenters)));
        }
        page.push(self.listing()).into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            ProjectListMessage::TagsLoaded(result) => {
                let task = escalate(settle(&mut self.tags, result.map(TagCatalog::new)));
                // Drop selections the fresh catalog no longer knows about.
                if let Loadable::Loaded(catalog) = &self.tags {
                    self.selected = self
                        .selected
                        .iter()
                        .filter(|id| catalog.contains(id))
                        .copied()
                        .collect();
                }
                task
            }
            ProjectListMessage::CentersLoaded(result) => {
                escalate(settle(&mut self.centers, result.map(CenterCatalog::new)))
            }
            ProjectListMessage::ProjectsLoaded(result) => {
                escalate(settle(&mut self.projects, result))
            }
            ProjectListMessage::ToggleTag(id) => {
                self.selected.toggle(id);
                Task::none()
            }
            ProjectListMessage::ClearFilters => {
                self.selected.clear();
                Task::none()
            }
            ProjectListMessage::Open(id) => Task::done(ScreenMessage::ParentMessage(
                ParentMessage::Navigate(Route::ProjectDetail(id)),
            )),
            ProjectListMessage::RetryTags => {
                self.tags = Loadable::Loading;
                Self::fetch_tags(state)
            }
            ProjectListMessage::RetryCenters => {
                self.centers = Loadable::Loading;
                Self::fetch_centers(state)
            }
            ProjectListMessage::RetryProjects => {
                self.projects = Loadable::Loading;
                Self::fetch_projects(state)
            }
        }
    }
}
