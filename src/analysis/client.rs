use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info, warn};

use crate::analysis::prompt::build_instruction;
use crate::analysis::quality;
use crate::analysis::schema::response_schema;
use crate::analysis::{AnalysisError, AnalysisResult};
use crate::backend::{GenerateRequest, GenerativeBackend};
use crate::keygate::KeyGate;

#[derive(Clone)]
pub struct AnalysisClient {
    gate: Arc<KeyGate>,
    backend: Arc<dyn GenerativeBackend>,
}

impl AnalysisClient {
    pub fn new(gate: Arc<KeyGate>, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { gate, backend }
    }

    pub fn gate(&self) -> &Arc<KeyGate> {
        &self.gate
    }

    pub async fn run_analysis(&self, topic: &str) -> Result<AnalysisResult, AnalysisError> {
        if !self.gate.is_selected() && !self.gate.check_key_presence().await? {
            info!("no API key selected, opening key selection before the request");
            self.gate.prompt_key_selection().await?;
        }

        let request = GenerateRequest {
            instruction_text: build_instruction(topic),
            output_contract: response_schema().clone(),
        };
        let started = Instant::now();
        let reply = match self.backend.generate(request).await {
            Ok(reply) => reply,
            Err(err) if err.is_not_found() => {
                warn!(backend = self.backend.name(), "backend rejected the credential: {err}");
                self.gate.mark_unselected();
                if let Err(prompt_err) = self.gate.prompt_key_selection().await {
                    error!("automatic key re-selection failed: {prompt_err}");
                }
                return Err(AnalysisError::CredentialRejected);
            }
            Err(err) => {
                error!(backend = self.backend.name(), "analysis request failed: {err}");
                return Err(AnalysisError::UnknownFailure(err.to_string()));
            }
        };
        info!(
            backend = self.backend.name(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "analysis reply received"
        );

        let raw = reply.text.unwrap_or_default();
        if raw.trim().is_empty() {
            return Err(AnalysisError::EmptyResponse);
        }
        let result: AnalysisResult =
            serde_json::from_str(&raw).map_err(|err| AnalysisError::MalformedResponse {
                reason: err.to_string(),
                raw: raw.clone(),
            })?;

        for finding in quality::inspect(&result) {
            warn!(field = %finding.field, "data quality: {}", finding.message);
        }
        Ok(result)
    }
}
