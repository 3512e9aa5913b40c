use assistant_link::{assistant::AssistantClient, config::ApiConfig};
use serde_json::{Value, json};
use std::time::Duration;
use wiremock::ResponseTemplate;

/// Create a client pointed at `base_url` with default timeouts
pub fn client_for(base_url: &str) -> AssistantClient {
    AssistantClient::new(&ApiConfig::default().with_base_url(base_url))
        .expect("Failed to build client")
}

/// Create a client with a sub-second request timeout
pub fn client_with_timeout(base_url: &str, timeout: Duration) -> AssistantClient {
    client_for(base_url).with_timeout(timeout)
}

pub fn ok_envelope(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "data": data}))
}

pub fn error_envelope(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"status": "error", "message": message}))
}

pub fn status_data(session_id: &str) -> Value {
    json!({
        "assistant_status": "ready",
        "assistant_available": true,
        "current_question": "What time is it?",
        "current_answer": "Processed: What time is it?",
        "question_count": 3,
        "session_id": session_id,
        "conversation_length": 3,
        "timestamp": "2024-05-01T10:00:00.250Z"
    })
}

pub fn stats_data() -> Value {
    json!({
        "total_questions": 3,
        "conversation_entries": 3,
        "session_id": "s-1",
        "assistant_status": "ready",
        "uptime": "2024-05-01T09:00:00Z"
    })
}

pub fn conversation_data() -> Value {
    json!({
        "conversation": [
            {
                "id": 1,
                "question": "What time is it?",
                "answer": "Processed: What time is it?",
                "timestamp": "2024-05-01T10:00:00Z",
                "user_id": "kitchen",
                "session_id": "s-1"
            },
            {
                "id": 2,
                "question": "Tell me a joke",
                "answer": "Processed: Tell me a joke",
                "timestamp": "2024-05-01T10:01:00Z",
                "user_id": "kitchen",
                "session_id": "s-1"
            }
        ],
        "total_count": 2,
        "session_id": "s-1"
    })
}
