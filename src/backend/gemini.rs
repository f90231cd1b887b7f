use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::backend::http::{build_client, parse_http_error, preview};
use crate::backend::{BackendError, GenerateReply, GenerateRequest, GenerativeBackend};
use crate::config::BackendConfig;
use crate::keygate::SharedCredential;

/// `generateContent` transport for the Gemini API.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: Client,
    base_url: String,
    model: String,
    credential: SharedCredential,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiBackend {
    pub fn from_config(config: &BackendConfig, credential: SharedCredential) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            credential,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

fn extract_text(body: &str) -> Result<Option<String>, BackendError> {
    let parsed: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|err| BackendError::InvalidEnvelope(format!("{err}: {}", preview(body))))?;
    let Some(content) = parsed.candidates.into_iter().next().and_then(|c| c.content) else {
        return Ok(None);
    };
    let texts = content
        .parts
        .into_iter()
        .filter_map(|part| part.text)
        .collect::<Vec<_>>();
    if texts.is_empty() {
        return Ok(None);
    }
    Ok(Some(texts.concat()))
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateReply, BackendError> {
        let key = self.credential.get().ok_or(BackendError::MissingCredential)?;
        let url = self.endpoint();
        let body = json!({
            "contents": [{ "parts": [{ "text": request.instruction_text }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.output_contract,
            }
        });

        info!(model = %self.model, "sending generateContent request");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", key)
            .json(&body)
            .send()
            .await
            .map_err(|err| BackendError::Transport(format!("POST {url}: {err}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| BackendError::Transport(format!("failed reading response body: {err}")))?;
        if !status.is_success() {
            return Err(parse_http_error(status.as_u16(), &text));
        }
        debug!(bytes = text.len(), "generateContent reply received");
        Ok(GenerateReply {
            text: extract_text(&text)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::{extract_text, GeminiBackend};
    use crate::backend::{BackendError, GenerateRequest, GenerativeBackend};
    use crate::config::BackendConfig;
    use crate::keygate::SharedCredential;

    const ENDPOINT: &str = "/v1beta/models/test-model:generateContent";

    fn backend(server: &MockServer, credential: SharedCredential) -> GeminiBackend {
        let config = BackendConfig {
            base_url: format!("{}/", server.uri()),
            model: "test-model".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 5,
        };
        GeminiBackend::from_config(&config, credential).expect("backend builds")
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            instruction_text: "Summarize the plan.".to_string(),
            output_contract: json!({"type": "OBJECT"}),
        }
    }

    #[tokio::test]
    async fn sends_instruction_schema_and_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .and(header("x-goog-api-key", "secret"))
            .and(body_partial_json(json!({
                "contents": [{"parts": [{"text": "Summarize the plan."}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": "1}"}]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = backend(&server, SharedCredential::with_key("secret"))
            .generate(request())
            .await
            .expect("reply");
        assert_eq!(reply.text.as_deref(), Some("{\"a\":1}"));
    }

    #[tokio::test]
    async fn maps_404_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}
            })))
            .mount(&server)
            .await;

        let err = backend(&server, SharedCredential::with_key("secret"))
            .generate(request())
            .await
            .expect_err("404 fails");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn server_errors_keep_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(ENDPOINT))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&server)
            .await;

        let err = backend(&server, SharedCredential::with_key("secret"))
            .generate(request())
            .await
            .expect_err("503 fails");
        assert!(matches!(err, BackendError::Status { status: 503, ref message } if message == "overloaded"));
    }

    #[tokio::test]
    async fn refuses_to_send_without_credential() {
        let server = MockServer::start().await;
        let err = backend(&server, SharedCredential::new())
            .generate(request())
            .await
            .expect_err("no key");
        assert!(matches!(err, BackendError::MissingCredential));
    }

    #[test]
    fn reply_without_candidates_has_no_text() {
        assert_eq!(extract_text(r#"{"candidates": []}"#).expect("envelope"), None);
        assert_eq!(
            extract_text(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).expect("envelope"),
            None
        );
        assert!(matches!(
            extract_text("not json"),
            Err(BackendError::InvalidEnvelope(_))
        ));
    }
}
