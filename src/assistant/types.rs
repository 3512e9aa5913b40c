use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state reported by the assistant.
///
/// Unrecognised values are kept verbatim in `Other` so they survive a
/// decode/encode round trip.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AssistantState {
    Idle,
    Listening,
    Processing,
    Speaking,
    Ready,
    Error,
    #[default]
    Unknown,
    Other(String),
}

impl AssistantState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Idle => "idle",
            Self::Listening => "listening",
            Self::Processing => "processing",
            Self::Speaking => "speaking",
            Self::Ready => "ready",
            Self::Error => "error",
            Self::Unknown => "unknown",
            Self::Other(value) => value,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Listening | Self::Processing | Self::Speaking)
    }
}

impl From<String> for AssistantState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "idle" => Self::Idle,
            "listening" => Self::Listening,
            "processing" => Self::Processing,
            "speaking" => Self::Speaking,
            "ready" => Self::Ready,
            "error" => Self::Error,
            "unknown" => Self::Unknown,
            _ => Self::Other(value),
        }
    }
}

impl From<AssistantState> for String {
    fn from(state: AssistantState) -> Self {
        match state {
            AssistantState::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AssistantState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantStatus {
    #[serde(default)]
    pub assistant_status: AssistantState,
    #[serde(default)]
    pub assistant_available: bool,
    #[serde(default)]
    pub current_question: String,
    #[serde(default)]
    pub current_answer: String,
    #[serde(default)]
    pub question_count: u64,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub conversation_length: u64,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub question_number: u64,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationEntry {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub session_id: String,
}

/// Full `/api/conversation` payload. Entries are in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationPage {
    #[serde(default)]
    pub conversation: Vec<ConversationEntry>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantStats {
    #[serde(default)]
    pub total_questions: u64,
    #[serde(default)]
    pub conversation_entries: u64,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub assistant_status: AssistantState,
    #[serde(with = "super::timestamp")]
    pub uptime: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleQuestion {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub description: String,
}

/// Full `/api/example-questions` payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleCatalog {
    #[serde(default)]
    pub questions: Vec<ExampleQuestion>,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub session_id: String,
    #[serde(with = "super::timestamp")]
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Optional filters for the conversation history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationQuery {
    pub user_id: Option<String>,
    pub limit: Option<u32>,
}

impl ConversationQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}
