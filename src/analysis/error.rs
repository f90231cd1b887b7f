use thiserror::Error;

use crate::keygate::KeyGateError;

/// Failure classes of one analysis request. `Display` is the one-line
/// message shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("API key environment not detected. Please configure a key source (env or prompt) and restart.")]
    EnvironmentUnavailable,
    #[error("Failed to open API key selection: {0}")]
    KeySelectionFailed(String),
    #[error("Received empty response from Gemini API.")]
    EmptyResponse,
    #[error("Failed to parse AI response: {reason}. Raw response: {raw}")]
    MalformedResponse { reason: String, raw: String },
    #[error("API Key might be invalid or needs re-selection. Please try again.")]
    CredentialRejected,
    #[error("Failed to perform business analysis: {0}")]
    UnknownFailure(String),
}

impl AnalysisError {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::EnvironmentUnavailable)
    }

    pub fn clears_key_selection(&self) -> bool {
        matches!(self, Self::CredentialRejected)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::EnvironmentUnavailable => "environment_unavailable",
            Self::KeySelectionFailed(_) => "key_selection_failed",
            Self::EmptyResponse => "empty_response",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::CredentialRejected => "credential_rejected",
            Self::UnknownFailure(_) => "unknown_failure",
        }
    }
}

impl From<KeyGateError> for AnalysisError {
    fn from(err: KeyGateError) -> Self {
        match err {
            KeyGateError::EnvironmentUnavailable => Self::EnvironmentUnavailable,
            KeyGateError::KeySelectionFailed(reason) => Self::KeySelectionFailed(reason),
        }
    }
}
