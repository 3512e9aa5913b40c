//! In-process stand-in for the assistant service with real session state.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

const CATEGORIES: [&str; 3] = ["General", "Personal", "Fun"];

#[derive(Debug)]
struct ServiceState {
    session_id: String,
    question_count: u64,
    current_question: String,
    current_answer: String,
    history: Vec<Value>,
}

impl ServiceState {
    fn new() -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            question_count: 0,
            current_question: String::new(),
            current_answer: String::new(),
            history: Vec::new(),
        }
    }
}

type SharedState = Arc<Mutex<ServiceState>>;

/// Running fake service; aborted on drop.
pub struct FakeAssistant {
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl FakeAssistant {
    pub async fn start() -> Self {
        let state: SharedState = Arc::new(Mutex::new(ServiceState::new()));

        let app = Router::new()
            .route("/api/status", get(status))
            .route("/api/ask", post(ask))
            .route("/api/conversation", get(conversation))
            .route("/api/stats", get(stats))
            .route("/api/example-questions", get(example_questions))
            .route("/api/reset", post(reset))
            .route("/health", get(health))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake service");
        let addr = listener.local_addr().expect("Fake service has no address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Fake service crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            handle,
        }
    }
}

impl Drop for FakeAssistant {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// Same offset-less format the real service emits
fn now() -> String {
    Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

fn success(data: Value) -> Response {
    Json(json!({"status": "success", "data": data})).into_response()
}

fn failure(code: StatusCode, message: &str) -> Response {
    (code, Json(json!({"status": "error", "message": message}))).into_response()
}

async fn status(State(state): State<SharedState>) -> Response {
    let state = state.lock().unwrap();
    success(json!({
        "assistant_status": "ready",
        "assistant_available": true,
        "current_question": state.current_question,
        "current_answer": state.current_answer,
        "question_count": state.question_count,
        "session_id": state.session_id,
        "conversation_length": state.history.len(),
        "timestamp": now()
    }))
}

async fn ask(State(state): State<SharedState>, Json(body): Json<Value>) -> Response {
    let Some(question) = body.get("question").and_then(Value::as_str) else {
        return failure(StatusCode::BAD_REQUEST, "Question is required");
    };
    let user_id = body
        .get("user_id")
        .and_then(Value::as_str)
        .unwrap_or("anonymous");

    let mut state = state.lock().unwrap();
    state.question_count += 1;
    let answer = format!("Processed: {question}");
    state.current_question = question.to_string();
    state.current_answer = answer.clone();

    let entry = json!({
        "id": state.history.len() + 1,
        "question": question,
        "answer": answer,
        "timestamp": now(),
        "user_id": user_id,
        "session_id": state.session_id
    });
    state.history.push(entry);

    success(json!({
        "question": question,
        "answer": answer,
        "question_number": state.question_count,
        "timestamp": now(),
        "session_id": state.session_id
    }))
}

async fn conversation(
    State(state): State<SharedState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let state = state.lock().unwrap();
    let limit = match params.get("limit").map(|l| l.parse::<usize>()) {
        Some(Ok(limit)) => limit,
        Some(Err(_)) => return failure(StatusCode::BAD_REQUEST, "Invalid limit"),
        None => 50,
    };

    let filtered: Vec<Value> = state
        .history
        .iter()
        .filter(|entry| match params.get("user_id") {
            Some(user_id) => entry["user_id"] == user_id.as_str(),
            None => true,
        })
        .cloned()
        .collect();
    let start = filtered.len().saturating_sub(limit);
    let page = filtered[start..].to_vec();

    success(json!({
        "conversation": page,
        "total_count": page.len(),
        "session_id": state.session_id
    }))
}

async fn stats(State(state): State<SharedState>) -> Response {
    let state = state.lock().unwrap();
    success(json!({
        "total_questions": state.question_count,
        "conversation_entries": state.history.len(),
        "session_id": state.session_id,
        "assistant_status": "ready",
        "uptime": now()
    }))
}

async fn example_questions(Query(params): Query<HashMap<String, String>>) -> Response {
    let questions = vec![
        json!({"id": 1, "category": "General", "question": "What time is it?", "description": "Ask for the current time"}),
        json!({"id": 4, "category": "Personal", "question": "How are you?", "description": "General greeting and wellbeing check"}),
        json!({"id": 9, "category": "Fun", "question": "Tell me a joke", "description": "Ask for entertainment"}),
    ];

    let questions: Vec<Value> = match params.get("category") {
        Some(category) => questions
            .into_iter()
            .filter(|q| {
                q["category"]
                    .as_str()
                    .is_some_and(|c| c.eq_ignore_ascii_case(category))
            })
            .collect(),
        None => questions,
    };

    success(json!({"questions": questions, "categories": CATEGORIES}))
}

async fn reset(State(state): State<SharedState>) -> Response {
    let mut state = state.lock().unwrap();
    *state = ServiceState::new();

    Json(json!({
        "status": "success",
        "message": "Conversation reset successfully",
        "data": {"session_id": state.session_id, "timestamp": now()}
    }))
    .into_response()
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "healthy", "timestamp": now()}))
}
