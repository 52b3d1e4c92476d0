use crate::{
    gui::screens::{
        ParentMessage, ScreenMessage, login::LoginScreen, project_detail::ProjectDetailScreen,
        project_form::ProjectFormScreen, project_list::ProjectListScreen, signup::SignupScreen,
    },
    routes::Route,
};

#[derive(Debug, Clone)]
pub enum Message {
    ProjectList(ScreenMessage<ProjectListScreen>),
    ProjectDetail(ScreenMessage<ProjectDetailScreen>),
    ProjectForm(ScreenMessage<ProjectFormScreen>),
    Login(ScreenMessage<LoginScreen>),
    Signup(ScreenMessage<SignupScreen>),
    Parent(ParentMessage),
    Navigate(Route),
    Logout,
    DismissNotice,
}
