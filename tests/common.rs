use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use coursedesk::api::ApiClient;
use coursedesk::config::Api;
use coursedesk::model::entity::{Instructor, LessonDraft, LessonType, ReviewState};
use coursedesk::notify::{Level, Notifier};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use url::Url;

pub const TOKEN: &str = "test-token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

/// Keeps every notice in memory so tests can assert on what the admin saw.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap().clone()
    }

    pub fn contains(&self, level: Level, message: &str) -> bool {
        self.notices()
            .iter()
            .any(|n| n.level == level && n.message == message)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: Level, message: &str) {
        self.notices.lock().unwrap().push(Notice {
            level,
            message: message.to_string(),
        });
    }
}

/// Knobs and recorded traffic of the fake admin backend.
#[derive(Debug, Default)]
pub struct BackendState {
    pub drafts: Vec<LessonDraft>,
    pub videos: HashMap<i64, Value>,
    pub codes: HashMap<i64, Value>,
    /// Detail requests for these drafts answer 503.
    pub failing_details: HashSet<i64>,
    pub details_delay: Option<Duration>,
    /// Transition requests answer 500.
    pub fail_transitions: bool,
    /// Transition requests answer 200 with `"code": 0`.
    pub refuse_transitions: bool,
    /// Transition responses carry the updated draft.
    pub echo_record: bool,
    /// Transition responses echo the draft as it was before the change.
    pub echo_stale_record: bool,
    /// List requests answer 500.
    pub fail_lists: bool,
    pub requests: Vec<String>,
}

impl BackendState {
    pub fn transition_requests(&self) -> Vec<String> {
        self.requests
            .iter()
            .filter(|r| r.starts_with("PATCH"))
            .cloned()
            .collect()
    }
}

pub type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub addr: SocketAddr,
    pub state: Shared,
}

impl FakeBackend {
    pub fn base_url(&self) -> Url {
        Url::parse(&format!("http://{}/api/", self.addr)).unwrap()
    }

    pub fn client(&self) -> ApiClient {
        self.client_with_token(Some(TOKEN))
    }

    pub fn client_with_token(&self, token: Option<&str>) -> ApiClient {
        let api = Api::new(
            self.base_url(),
            token.map(String::from),
            Duration::from_secs(5),
        );
        ApiClient::new(&api).unwrap()
    }

    pub fn with_state<T>(&self, f: impl FnOnce(&mut BackendState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    pub fn transition_requests(&self) -> Vec<String> {
        self.with_state(|s| s.transition_requests())
    }

    pub fn detail_requests(&self) -> Vec<String> {
        self.with_state(|s| {
            s.requests
                .iter()
                .filter(|r| r.contains("lessons-draft"))
                .cloned()
                .collect()
        })
    }
}

pub fn draft(id: i64, title: &str, lesson_type: LessonType, review: ReviewState) -> LessonDraft {
    LessonDraft::new(
        id,
        title,
        lesson_type,
        3,
        Instructor {
            name: "Nguyen Van A".into(),
            email: "a@example.com".into(),
        },
    )
    .with_review(review)
}

pub fn video_payload(id: i64, duration: u64) -> Value {
    json!({
        "id": 1000 + id,
        "lessonDraftId": id,
        "videoUrl": format!("https://cdn.example.com/lessons/{id}.mp4"),
        "duration": duration,
        "content": "",
        "responseFromAI": null
    })
}

pub fn code_payload(id: i64) -> Value {
    json!({
        "id": 2000 + id,
        "lessonDraftId": id,
        "language": "rust",
        "content": "Print the sum of two numbers",
        "initialCode": "fn main() {\n}",
        "solutionCode": "fn main() {\n    println!(\"3\");\n}",
        "expectedOutput": "3",
        "hints": "Read both numbers first",
        "difficultyLevel": "EASY",
        "testCaseInput": "1 2",
        "testCaseOutput": "3",
        "testCaseDescription": "small positive numbers"
    })
}

/// Backend seeded with a video draft (42), a code draft (7), a quiz draft (13),
/// a video draft whose details fail (99), an approved (5) and a rejected (6) draft.
pub fn seeded_state() -> BackendState {
    let mut state = BackendState {
        drafts: vec![
            draft(42, "Ownership basics", LessonType::Video, ReviewState::New),
            draft(7, "Borrow checker drills", LessonType::Code, ReviewState::New),
            draft(13, "Closures quiz", LessonType::Quiz, ReviewState::New),
            draft(99, "Lifetimes explained", LessonType::Video, ReviewState::New),
            draft(5, "Intro to cargo", LessonType::Video, ReviewState::Approved),
            draft(
                6,
                "Traits in depth",
                LessonType::Code,
                ReviewState::Rejected {
                    reason: "Missing test case".into(),
                },
            ),
        ],
        ..Default::default()
    };

    state.videos.insert(42, video_payload(42, 125));
    state.videos.insert(99, video_payload(99, 600));
    state.videos.insert(5, video_payload(5, 60));
    state.codes.insert(7, code_payload(7));
    state.codes.insert(6, code_payload(6));
    state.failing_details.insert(99);
    state
}

pub async fn spawn_backend(state: BackendState) -> FakeBackend {
    let state: Shared = Arc::new(Mutex::new(state));

    let admin = Router::new()
        .route("/admin/lesson-drafts", get(list_handler))
        .route("/admin/video-lessons-draft", get(video_handler))
        .route("/admin/code-lessons-draft", get(code_handler))
        .route("/admin/lesson-drafts/{id}/approve", patch(approve_handler))
        .route("/admin/lesson-drafts/{id}/reject", patch(reject_handler))
        .with_state(state.clone());

    let app = Router::new().nest("/api", admin);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend { addr, state }
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "token expired" })),
    )
        .into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DraftQuery {
    lesson_draft_id: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectRequest {
    rejected_reason: String,
}

async fn list_handler(State(state): State<Shared>, headers: HeaderMap) -> Response {
    let mut state = state.lock().unwrap();
    state.requests.push("GET /admin/lesson-drafts".into());
    if !authorized(&headers) {
        return unauthorized();
    }
    if state.fail_lists {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        )
            .into_response();
    }

    Json(json!({
        "code": 1,
        "lessons": state.drafts,
        "totalElements": state.drafts.len(),
    }))
    .into_response()
}

async fn details(
    state: Shared,
    headers: HeaderMap,
    path: &str,
    id: i64,
    key: &str,
    pick: impl Fn(&BackendState) -> Option<Value>,
) -> Response {
    let delay = {
        let mut state = state.lock().unwrap();
        state.requests.push(format!("GET {path}?lessonDraftId={id}"));
        state.details_delay
    };
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }

    let state = state.lock().unwrap();
    if !authorized(&headers) {
        return unauthorized();
    }
    if state.failing_details.contains(&id) {
        return (StatusCode::SERVICE_UNAVAILABLE, "upstream unavailable").into_response();
    }

    match pick(&state) {
        Some(payload) => {
            let mut body = serde_json::Map::new();
            body.insert("code".into(), json!(1));
            body.insert(key.to_string(), payload);
            Json(Value::Object(body)).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "no details" }))).into_response(),
    }
}

async fn video_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<DraftQuery>,
) -> Response {
    let id = query.lesson_draft_id;
    details(state, headers, "/admin/video-lessons-draft", id, "videoLesson", |s| {
        s.videos.get(&id).cloned()
    })
    .await
}

async fn code_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Query(query): Query<DraftQuery>,
) -> Response {
    let id = query.lesson_draft_id;
    details(state, headers, "/admin/code-lessons-draft", id, "codeLessonDraft", |s| {
        s.codes.get(&id).cloned()
    })
    .await
}

fn transition(state: &mut BackendState, id: i64, review: ReviewState) -> Response {
    if state.fail_transitions {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "database unavailable" })),
        )
            .into_response();
    }
    if state.refuse_transitions {
        return Json(json!({ "code": 0, "message": "Lesson is locked" })).into_response();
    }

    let Some(index) = state.drafts.iter().position(|d| d.id() == id) else {
        return (StatusCode::NOT_FOUND, Json(json!({ "message": "no draft" }))).into_response();
    };

    let previous = state.drafts[index].clone();
    let updated = previous.clone().with_review(review);
    state.drafts[index] = updated.clone();

    if state.echo_stale_record {
        Json(json!({ "code": 1, "lessonDraft": previous })).into_response()
    } else if state.echo_record {
        Json(json!({ "code": 1, "lessonDraft": updated })).into_response()
    } else {
        StatusCode::OK.into_response()
    }
}

async fn approve_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    let mut state = state.lock().unwrap();
    state
        .requests
        .push(format!("PATCH /admin/lesson-drafts/{id}/approve"));
    if !authorized(&headers) {
        return unauthorized();
    }
    transition(&mut state, id, ReviewState::Approved)
}

async fn reject_handler(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<RejectRequest>,
) -> Response {
    let mut state = state.lock().unwrap();
    state
        .requests
        .push(format!("PATCH /admin/lesson-drafts/{id}/reject"));
    if !authorized(&headers) {
        return unauthorized();
    }
    transition(
        &mut state,
        id,
        ReviewState::Rejected {
            reason: body.rejected_reason,
        },
    )
}
