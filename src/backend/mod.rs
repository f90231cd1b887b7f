pub mod gemini;
pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use gemini::GeminiBackend;

/// Message a backend uses when the credential or model does not resolve.
pub const NOT_FOUND_PHRASE: &str = "Requested entity was not found.";

/// One structured generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub instruction_text: String,
    /// Schema the reply must conform to, in the backend's dialect.
    pub output_contract: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateReply {
    pub text: Option<String>,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{0}")]
    NotFound(String),
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid reply envelope: {0}")]
    InvalidEnvelope(String),
    #[error("no API key available for the request")]
    MissingCredential,
}

impl BackendError {
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Status { message, .. } => message.contains(NOT_FOUND_PHRASE),
            _ => false,
        }
    }
}

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateReply, BackendError>;
}


#[cfg(test)]
mod tests {
    use super::{BackendError, NOT_FOUND_PHRASE};

    #[test]
    fn recognizes_not_found_in_status_messages() {
        assert!(BackendError::NotFound("gone".to_string()).is_not_found());
        assert!(BackendError::Status {
            status: 400,
            message: format!("upstream said: {NOT_FOUND_PHRASE}"),
        }
        .is_not_found());
        assert!(!BackendError::Status {
            status: 500,
            message: "internal".to_string(),
        }
        .is_not_found());
        assert!(!BackendError::Transport("timeout".to_string()).is_not_found());
    }
}
