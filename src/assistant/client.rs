use super::types::*;
use crate::{
    Error, Result,
    config::ApiConfig,
    transport::{QueryString, RequestExecutor},
};
use async_trait::async_trait;
use reqwest::Method;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Anything able to report the assistant's current status.
///
/// This is the seam the status poller depends on.
#[async_trait]
pub trait StatusSource: Send + Sync {
    async fn fetch_status(&self) -> Result<AssistantStatus>;
}

/// Typed operations against the assistant service, one per endpoint.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    executor: RequestExecutor,
    health_timeout: Duration,
}

impl AssistantClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            executor: RequestExecutor::new(config)?,
            health_timeout: config.health_timeout(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.executor = self.executor.with_timeout(timeout);
        self
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        self.executor.base_url()
    }

    pub async fn get_status(&self) -> Result<AssistantStatus> {
        self.executor
            .get::<AssistantStatus>("/api/status")
            .await?
            .into_result()
    }

    /// Asks a question. Blank questions are rejected before any request.
    pub async fn ask_question(
        &self,
        question: &str,
        user_id: Option<&str>,
    ) -> Result<QuestionResponse> {
        if question.trim().is_empty() {
            return Err(Error::validation("Question is required"));
        }

        let body = AskRequest {
            question: question.to_string(),
            user_id: user_id.map(str::to_string),
        };

        debug!("Asking question ({} chars)", body.question.len());

        let response = self
            .executor
            .post::<_, QuestionResponse>("/api/ask", Some(&body))
            .await?
            .into_result()?;

        info!(
            "Question #{} answered for session {}",
            response.question_number, response.session_id
        );
        Ok(response)
    }

    pub async fn get_conversation_page(&self, query: &ConversationQuery) -> Result<ConversationPage> {
        let path = QueryString::new()
            .push("user_id", query.user_id.as_deref())
            .push("limit", query.limit)
            .to_path("/api/conversation");

        self.executor
            .get::<ConversationPage>(&path)
            .await?
            .into_result()
    }

    pub async fn get_conversation(&self, query: &ConversationQuery) -> Result<Vec<ConversationEntry>> {
        Ok(self.get_conversation_page(query).await?.conversation)
    }

    pub async fn get_stats(&self) -> Result<AssistantStats> {
        self.executor
            .get::<AssistantStats>("/api/stats")
            .await?
            .into_result()
    }

    pub async fn get_example_catalog(&self, category: Option<&str>) -> Result<ExampleCatalog> {
        let path = QueryString::new()
            .push("category", category)
            .to_path("/api/example-questions");

        self.executor
            .get::<ExampleCatalog>(&path)
            .await?
            .into_result()
    }

    pub async fn get_example_questions(&self, category: Option<&str>) -> Result<Vec<ExampleQuestion>> {
        Ok(self.get_example_catalog(category).await?.questions)
    }

    /// Starts a new server-side session. Sends no body.
    pub async fn reset_conversation(&self) -> Result<ResetOutcome> {
        let outcome = self
            .executor
            .post::<(), ResetOutcome>("/api/reset", None)
            .await?
            .into_result()?;

        info!("Conversation reset, new session {}", outcome.session_id);
        Ok(outcome)
    }

    /// Probes `/health`. Any failure is reported as `false`.
    pub async fn check_health(&self) -> bool {
        match self
            .executor
            .send(Method::GET, "/health", None, self.health_timeout)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                warn!("Health check failed: {}", e);
                false
            }
        }
    }
}

#[async_trait]
impl StatusSource for AssistantClient {
    async fn fetch_status(&self) -> Result<AssistantStatus> {
        self.get_status().await
    }
}
