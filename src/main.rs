use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::warn;
use uuid::Uuid;

use unilink::{
    actions::{self, CatalogLoad, SubmitError, SubmitTarget},
    api::{AccountRepository, ApiClient, ProjectRepository, SessionState, SessionStore},
    config::{DEFAULT_CONFIG_FILE, Settings},
    core::{
        CenterCatalog, LoginForm, ProjectForm, SignupForm, TagCatalog, TagSelectionSet, TagsEditor,
    },
    filter_projects,
    models::TagId,
    routes::{self, Route},
    telemetry, ui,
};

#[derive(Parser)]
#[command(name = "unilink")]
#[command(about = "Browse, filter, and manage university projects")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    api: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the tag catalog
    Tags,
    /// List the center catalog
    Centers,
    /// List projects, keeping only those carrying every given tag
    Projects {
        #[arg(long = "tag", value_name = "NAME|ID")]
        tags: Vec<String>,
    },
    /// Show one project
    Show { id: Uuid },
    /// Create a project
    Create(CreateArgs),
    /// Edit an existing project
    Edit(EditArgs),
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Display name; sends the extended login body
        #[arg(long)]
        name: Option<String>,
    },
    /// Create an account and sign in with it
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session
    Whoami,
    /// Open the desktop client
    #[cfg(feature = "gui")]
    Gui,
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    /// Center name or id
    #[arg(long, value_name = "NAME|ID")]
    center: String,
    #[arg(long, value_name = "ID")]
    owner: String,
    #[arg(long, value_name = "URL")]
    img_url: String,
    #[arg(long, default_value = "1")]
    team_size: String,
    /// Mark the project as open for applications
    #[arg(long)]
    open: bool,
    #[arg(long = "tag", value_name = "NAME|ID")]
    tags: Vec<String>,
}

#[derive(Args)]
struct EditArgs {
    id: Uuid,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long, value_name = "NAME|ID")]
    center: Option<String>,
    #[arg(long, value_name = "ID")]
    owner: Option<String>,
    #[arg(long, value_name = "URL")]
    img_url: Option<String>,
    #[arg(long)]
    team_size: Option<String>,
    #[arg(long, value_name = "BOOL")]
    open: Option<bool>,
    /// Do not resend the project's current tags
    #[arg(long)]
    clear_tags: bool,
    #[arg(long = "add-tag", value_name = "NAME|ID")]
    add_tags: Vec<String>,
    #[arg(long = "remove-tag", value_name = "NAME|ID")]
    remove_tags: Vec<String>,
}

impl Command {
    fn route(&self) -> Route {
        match self {
            Command::Show { id } => Route::ProjectDetail(*id),
            Command::Create(_) => Route::NewProject,
            Command::Edit(args) => Route::EditProject(args.id),
            Command::Login { .. } => Route::Login,
            Command::Signup { .. } => Route::Signup,
            _ => Route::Projects,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    telemetry::init_subscriber(args.verbose)?;

    let mut settings = Settings::load(&args.config)?;
    settings.apply_api_override(args.api);
    let session = Arc::new(SessionState::persistent(SessionStore::new(&settings.session_file)));
    let client = ApiClient::from_settings(&settings, session)?;

    #[cfg(feature = "gui")]
    if let Command::Gui = args.command {
        return unilink::gui::run(client);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let route = args.command.route();
    match runtime.block_on(run(args.command, &client)) {
        Err(e) if is_unauthorized(&e) => {
            if let Some(target) = routes::redirect_after_unauthorized(&route) {
                println!("Your session has ended. Sign in again ({target}): unilink login");
            }
            Err(e)
        }
        other => other,
    }
}

fn is_unauthorized(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<unilink::ApiError>()
            .is_some_and(|e| e.is_unauthorized())
            || cause
                .downcast_ref::<SubmitError>()
                .is_some_and(SubmitError::is_unauthorized)
    })
}

async fn run(command: Command, client: &ApiClient) -> anyhow::Result<()> {
    let route = routes::guard(command.route(), client.is_authenticated());
    if route == Route::Login && command.route().is_protected() {
        anyhow::bail!("Sign in first: unilink login --email <EMAIL> --password <PASSWORD>");
    }

    match command {
        Command::Tags => {
            let tags = load_tags(client).await?;
            for tag in tags.tags() {
                println!("{}  {}", tag.id, ui::components::tag_chip(tag, false));
            }
        }
        Command::Centers => {
            let CatalogLoad { centers, .. } = actions::load_catalogs(client).await;
            let centers =
                centers.context("Failed to load centers; run the command again to retry")?;
            for center in centers.centers() {
                println!("{}  {}  {}", center.id, center.name, center.center_url);
            }
        }
        Command::Projects { tags: keys } => list_projects(client, &keys).await?,
        Command::Show { id } => {
            let (catalogs, project) =
                tokio::join!(actions::load_catalogs(client), client.get_project(id));
            let (tags, centers) = catalogs_or_empty(catalogs);
            match project? {
                Some(project) => print!("{}", ui::project_detail(&project, &tags, &centers)),
                None => print!("{}", ui::not_found(&id)),
            }
        }
        Command::Create(args) => create_project(client, args).await?,
        Command::Edit(args) => edit_project(client, args).await?,
        Command::Login { email, password, name } => {
            let mut form = LoginForm::new(email, password);
            let session = report_invalid(actions::sign_in(client, &mut form, name).await)?;
            println!("Signed in. Session valid until {}.", format_time(session.expires_at)?);
        }
        Command::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let mut form = SignupForm::new(name, email, password, confirm_password);
            report_invalid(actions::sign_up(client, &mut form).await)?;
            println!("Account created and signed in. Browse projects: unilink projects");
        }
        Command::Logout => {
            client.logout()?;
            println!("Signed out.");
        }
        Command::Whoami => match client.session().current() {
            Some(session) if session.is_live() => {
                println!("Signed in until {}.", format_time(session.expires_at)?)
            }
            _ => println!("Not signed in."),
        },
        #[cfg(feature = "gui")]
        Command::Gui => unreachable!("gui is dispatched before the runtime starts"),
    }
    Ok(())
}

fn format_time(at: time::OffsetDateTime) -> anyhow::Result<String> {
    Ok(at.format(&time::format_description::well_known::Rfc3339)?)
}

/// Prints per-field messages for a rejected form before propagating.
fn report_invalid<T>(result: Result<T, SubmitError>) -> anyhow::Result<T> {
    if let Err(SubmitError::Invalid(errors)) = &result {
        eprintln!("Cannot submit:\n{}", ui::field_errors(errors));
    }
    Ok(result?)
}

async fn load_tags(client: &ApiClient) -> anyhow::Result<TagCatalog> {
    let CatalogLoad { tags, .. } = actions::load_catalogs(client).await;
    tags.context("Failed to load tags; run the command again to retry")
}

fn catalogs_or_empty(load: CatalogLoad) -> (TagCatalog, CenterCatalog) {
    let tags = load.tags.unwrap_or_else(|e| {
        warn!(error = %e, "Tag catalog unavailable.");
        TagCatalog::default()
    });
    let centers = load.centers.unwrap_or_else(|e| {
        warn!(error = %e, "Center catalog unavailable.");
        CenterCatalog::default()
    });
    (tags, centers)
}

fn resolve_tags(catalog: &TagCatalog, keys: &[String]) -> anyhow::Result<Vec<TagId>> {
    keys.iter()
        .map(|key| {
            catalog
                .resolve(key)
                .map(|tag| tag.id)
                .with_context(|| format!("Unknown tag: {key}"))
        })
        .collect()
}

fn resolve_center(centers: &CenterCatalog, key: String) -> String {
    centers
        .resolve(&key)
        .map(|center| center.id.to_string())
        .unwrap_or(key)
}

async fn list_projects(client: &ApiClient, keys: &[String]) -> anyhow::Result<()> {
    let (catalogs, projects) = tokio::join!(actions::load_catalogs(client), client.get_projects());
    if !keys.is_empty()
        && let Err(e) = &catalogs.tags
    {
        anyhow::bail!("Cannot filter without the tag catalog ({e}); run the command again to retry");
    }
    let (tags, centers) = catalogs_or_empty(catalogs);
    let projects = projects.context("Failed to load projects; run the command again to retry")?;

    let selected: TagSelectionSet = resolve_tags(&tags, keys)?.into_iter().collect();
    let visible = filter_projects(&projects, &selected);

    let mut body = String::new();
    if !tags.is_empty() {
        body.push_str(&ui::filter_bar(&tags, &selected));
        body.push('\n');
    }
    body.push_str(&ui::project_listing(&visible, &tags, &centers));
    print!("{}", ui::layout("Projects", &body, client.is_authenticated()));
    Ok(())
}

async fn create_project(client: &ApiClient, args: CreateArgs) -> anyhow::Result<()> {
    let (tags, centers) = catalogs_or_empty(actions::load_catalogs(client).await);
    let mut form = ProjectForm::default();
    form.name = args.name;
    form.description = args.description;
    form.center_id = resolve_center(&centers, args.center);
    form.owner_id = args.owner;
    form.open_for_applications = args.open;
    form.img_url = args.img_url;
    form.team_size = args.team_size;
    let mut editor = TagsEditor::new();
    for id in resolve_tags(&tags, &args.tags)? {
        editor.select_add(id);
    }
    let project = report_invalid(
        actions::submit_project(client, &mut form, &editor, SubmitTarget::Create).await,
    )?;
    println!("Project created: {}\n", Route::ProjectDetail(project.id));
    print!("{}", ui::project_detail(&project, &tags, &centers));
    Ok(())
}

async fn edit_project(client: &ApiClient, args: EditArgs) -> anyhow::Result<()> {
    let (catalogs, project) =
        tokio::join!(actions::load_catalogs(client), client.get_project(args.id));
    let (tags, centers) = catalogs_or_empty(catalogs);
    let Some(project) = project? else {
        print!("{}", ui::not_found(&args.id));
        return Ok(());
    };

    let mut form = ProjectForm::from_project(&project);
    if let Some(name) = args.name {
        form.name = name;
    }
    if let Some(description) = args.description {
        form.description = description;
    }
    if let Some(center) = args.center {
        form.center_id = resolve_center(&centers, center);
    }
    if let Some(owner) = args.owner {
        form.owner_id = owner;
    }
    if let Some(img_url) = args.img_url {
        form.img_url = img_url;
    }
    if let Some(team_size) = args.team_size {
        form.team_size = team_size;
    }
    if let Some(open) = args.open {
        form.open_for_applications = open;
    }

    let mut editor = TagsEditor::for_project(&project);
    if args.clear_tags {
        editor.clear_add();
    }
    for id in resolve_tags(&tags, &args.add_tags)? {
        editor.select_add(id);
    }
    for id in resolve_tags(&tags, &args.remove_tags)? {
        editor.select_remove(id);
    }
    let conflicts = editor.conflicts();
    if !conflicts.is_empty() {
        warn!(?conflicts, "Tags queued for both addition and removal; sending both.");
    }

    let saved = report_invalid(
        actions::submit_project(client, &mut form, &editor, SubmitTarget::Update(project.id)).await,
    )?;
    println!("Project updated: {}\n", Route::ProjectDetail(saved.id));
    print!("{}", ui::project_detail(&saved, &tags, &centers));
    Ok(())
}
