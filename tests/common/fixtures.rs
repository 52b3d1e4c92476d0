use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use serde_json::{Value, json};
use unilink::{
    ApiClient, SessionState, SessionStore,
    core::{CenterCatalog, TagCatalog},
    models::{Center, Project, Tag, TagId},
};
use uuid::Uuid;

pub const IA: usize = 1;
pub const WEB: usize = 2;
pub const ML: usize = 3;
pub const IOT: usize = 4;
pub const DADOS: usize = 5;
pub const DESIGN: usize = 6;
pub const EDUCACAO: usize = 7;
pub const SAUDE: usize = 8;
pub const ROBOTICA: usize = 9;
pub const SUSTENTABILIDADE: usize = 10;

pub fn tag_id(n: usize) -> TagId {
    Uuid::parse_str(&format!("b9e1b8f1-c1a2-4c3d-8f1a-{n:012}")).expect("valid tag id")
}

pub fn center_id(n: usize) -> Uuid {
    Uuid::parse_str(&format!("1f5f9c36-8d9a-4a0a-85b6-f8f7a8a0{n:04}")).expect("valid center id")
}

pub fn owner_id(n: usize) -> Uuid {
    Uuid::parse_str(&format!("5d5d0b1b-2d5a-4f4a-9d9b-{n:012}")).expect("valid owner id")
}

pub fn sample_tags() -> Vec<Tag> {
    [
        ("IA", "#8B5CF6"),
        ("Web", "#06B6D4"),
        ("ML", "#10B981"),
        ("IoT", "#F59E0B"),
        ("Dados", "#3B82F6"),
        ("Design", "#EC4899"),
        ("Educação", "#A3E635"),
        ("Saúde", "#EF4444"),
        ("Robótica", "#22C55E"),
        ("Sustentabilidade", "#84CC16"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, color))| Tag {
        id: tag_id(i + 1),
        name: name.to_string(),
        color_hex: color.to_string(),
    })
    .collect()
}

pub fn sample_centers() -> Vec<Center> {
    [
        "Centro Tecnológico",
        "Centro de Artes",
        "Centro de Humanidades",
        "Centro de Ciências da Saúde",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, name)| Center {
        id: center_id(i + 1),
        name: name.to_string(),
        center_url: "#".to_string(),
    })
    .collect()
}

pub fn make_project(id: &str, name: &str, center: usize, tags: &[usize]) -> Project {
    Project {
        id: Uuid::parse_str(id).expect("valid project id"),
        name: name.to_string(),
        description: format!("{name}: a university project looking for collaborators."),
        center_id: center_id(center),
        owner_id: owner_id(center),
        open_for_applications: true,
        img_url: "https://picsum.photos/seed/unilink/800/600".to_string(),
        team_size: 5,
        tag_ids: tags.iter().map(|&n| tag_id(n)).collect(),
    }
}

pub fn sample_projects() -> Vec<Project> {
    vec![
        make_project(
            "6f6f0b1b-2d5a-4f4a-9d9b-111111111111",
            "Plataforma Tutoria Inteligente",
            3,
            &[IA, ML, EDUCACAO],
        ),
        make_project(
            "7c7c0b1b-2d5a-4f4a-9d9b-222222222222",
            "Observatório de Dados Urbanos",
            1,
            &[DADOS, WEB],
        ),
        make_project(
            "8d8d0b1b-2d5a-4f4a-9d9b-333333333333",
            "Arte Generativa Interativa",
            2,
            &[DESIGN, IA, IOT],
        ),
        make_project(
            "9e9e0b1b-2d5a-4f4a-9d9b-444444444444",
            "Monitoramento de Estufas IoT",
            1,
            &[IOT, ROBOTICA, SUSTENTABILIDADE],
        ),
        make_project(
            "aaaa0b1b-2d5a-4f4a-9d9b-555555555555",
            "Clínica Digital Preventiva",
            4,
            &[SAUDE, DADOS, IA, ML],
        ),
    ]
}

pub fn sample_tag_catalog() -> TagCatalog {
    TagCatalog::new(sample_tags())
}

pub fn sample_center_catalog() -> CenterCatalog {
    CenterCatalog::new(sample_centers())
}

/// One request as the stub backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct StubState {
    routes: Mutex<HashMap<(Method, String), (StatusCode, Value)>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process HTTP backend answering canned JSON per method and path.
/// Unknown routes answer 404.
pub struct StubBackend {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubBackend {
    pub async fn start() -> anyhow::Result<Self> {
        let state = Arc::new(StubState::default());
        let app = Router::new().fallback(answer).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub backend crashed");
        });
        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
        })
    }

    pub fn respond(&self, method: Method, path: &str, status: StatusCode, body: Value) {
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn client(&self, session: SessionState) -> ApiClient {
        ApiClient::new(self.base_url.clone(), Arc::new(session)).expect("client builds")
    }

    /// Canned catalog and listing responses built from the sample data.
    pub fn serve_samples(&self) {
        self.respond(Method::GET, "/api/tags", StatusCode::OK, json!(sample_tags()));
        self.respond(Method::GET, "/api/centers", StatusCode::OK, json!(sample_centers()));
        self.respond(Method::GET, "/api/projects", StatusCode::OK, json!(sample_projects()));
    }
}

async fn answer(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    });
    let (status, payload) = state
        .routes
        .lock()
        .unwrap()
        .get(&(method, path))
        .cloned()
        .unwrap_or((StatusCode::NOT_FOUND, json!({ "message": "Not found" })));
    (status, [(header::CONTENT_TYPE, "application/json")], payload.to_string())
}

/// Session persisted under a fresh temporary directory.
pub fn persistent_session() -> (SessionState, SessionStore, tempfile::TempDir) {
    let dir = tempfile::TempDir::new().expect("Failed to create temp directory");
    let store = SessionStore::new(dir.path().join("session.json"));
    (SessionState::persistent(store.clone()), store, dir)
}
