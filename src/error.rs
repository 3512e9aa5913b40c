use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Message used when an error envelope carries no `message` of its own.
pub const DEFAULT_API_ERROR_MESSAGE: &str = "API Error";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP {status}{}", message_suffix(.message))]
    Protocol { status: u16, message: Option<String> },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Assistant API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse grouping of errors by the recovery action a front-end should take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The service could not be reached in time (network or timeout).
    Unreachable,
    /// The service answered but reported a problem (envelope error or non-2xx).
    Service,
    /// The response could not be understood.
    Malformed,
    /// Input was rejected locally, nothing was sent.
    InvalidInput,
    /// Local setup problem (configuration, files).
    Local,
}

fn message_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl Clone for Error {
    fn clone(&self) -> Self {
        match self {
            Self::Validation(s) => Self::Validation(s.clone()),
            Self::Network(s) => Self::Network(s.clone()),
            Self::Timeout(d) => Self::Timeout(*d),
            Self::Protocol { status, message } => Self::Protocol {
                status: *status,
                message: message.clone(),
            },
            Self::Decode(s) => Self::Decode(s.clone()),
            Self::Api(s) => Self::Api(s.clone()),
            Self::Config(s) => Self::Config(s.clone()),
            // Source errors are not cloneable, keep their rendering
            Self::Json(e) => Self::Decode(e.to_string()),
            Self::Yaml(e) => Self::Config(format!("YAML error: {}", e)),
            Self::Io(e) => Self::Config(format!("IO error: {}", e)),
        }
    }
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn api(msg: impl Into<String>) -> Self {
        Self::Api(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Network(_) | Self::Timeout(_) => ErrorKind::Unreachable,
            Self::Api(_) | Self::Protocol { .. } => ErrorKind::Service,
            Self::Decode(_) | Self::Json(_) => ErrorKind::Malformed,
            Self::Validation(_) => ErrorKind::InvalidInput,
            Self::Config(_) | Self::Yaml(_) | Self::Io(_) => ErrorKind::Local,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.kind() == ErrorKind::Unreachable
    }

    pub fn is_service_error(&self) -> bool {
        self.kind() == ErrorKind::Service
    }

    pub fn is_invalid_input(&self) -> bool {
        self.kind() == ErrorKind::InvalidInput
    }
}
