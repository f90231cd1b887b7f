use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;

use crate::backend::{BackendError, NOT_FOUND_PHRASE};
use crate::config::BackendConfig;

const USER_AGENT: &str = concat!("strategy-generator/", env!("CARGO_PKG_VERSION"));
const PREVIEW_CHARS: usize = 180;

pub fn build_client(config: &BackendConfig) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .context("failed to build HTTP client")
}

pub fn preview(body: &str) -> String {
    body.chars().take(PREVIEW_CHARS).collect()
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Classifies a non-success reply by status code and error body.
pub fn parse_http_error(status: u16, body: &str) -> BackendError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) if !code.is_empty() => format!("{} ({code})", envelope.error.message),
            _ => envelope.error.message,
        },
        Err(_) => preview(body),
    };
    if status == 404 || message.contains(NOT_FOUND_PHRASE) {
        let message = if message.trim().is_empty() {
            NOT_FOUND_PHRASE.to_string()
        } else {
            message
        };
        return BackendError::NotFound(message);
    }
    BackendError::Status { status, message }
}
