use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::{AnalysisClient, AnalysisError, AnalysisResult};
use crate::keygate::{KeyGate, KeyGateError};
use crate::view::{DisplayMode, ViewPhase, ViewState};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("the API key environment is unavailable for this session")]
    EnvironmentUnavailable,
    #[error("an analysis is already running")]
    AlreadyLoading,
    #[error("select an API key first")]
    KeyNotSelected,
    #[error("no analysis result to display")]
    NoResult,
}

#[derive(Debug, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> ViewPhase {
        self.state.phase()
    }

    pub async fn init(&mut self, gate: &KeyGate) {
        match gate.check_key_presence().await {
            Ok(selected) => {
                self.state.is_key_selected = selected;
                info!(selected, "initial API key check complete");
            }
            Err(err) => self.record_error(err.into()),
        }
    }

    pub async fn select_key(&mut self, gate: &KeyGate) -> Result<(), ViewError> {
        self.begin_key_selection()?;
        let outcome = gate.prompt_key_selection().await;
        self.finish_key_selection(outcome);
        Ok(())
    }

    pub fn begin_key_selection(&self) -> Result<(), ViewError> {
        self.ensure_usable()
    }

    pub fn finish_key_selection(&mut self, outcome: Result<(), KeyGateError>) {
        match outcome {
            Ok(()) => {
                self.state.is_key_selected = true;
                self.state.last_error = None;
            }
            Err(err @ KeyGateError::EnvironmentUnavailable) => self.record_error(err.into()),
            Err(err) => {
                // Selection failures leave the key state as it was.
                self.state.last_error = Some(AnalysisError::from(err).to_string());
            }
        }
    }

    /// Enters `Loading`, clearing the previous result and resetting the mode.
    pub fn begin_generate(&mut self) -> Result<(), ViewError> {
        self.ensure_usable()?;
        if !self.state.is_key_selected {
            return Err(ViewError::KeyNotSelected);
        }
        self.state.is_loading = true;
        self.state.last_error = None;
        self.state.analysis_result = None;
        self.state.generated_at = None;
        self.state.display_mode = DisplayMode::Analysis;
        Ok(())
    }

    pub fn complete(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        self.state.is_loading = false;
        match outcome {
            Ok(result) => {
                self.state.analysis_result = Some(result);
                self.state.generated_at = Some(Utc::now());
                self.state.display_mode = DisplayMode::Analysis;
            }
            Err(err) => self.record_error(err),
        }
    }

    /// Analysis failures land in the state, not the return value.
    pub async fn generate(&mut self, client: &AnalysisClient, topic: &str) -> Result<(), ViewError> {
        self.begin_generate()?;
        let outcome = client.run_analysis(topic).await;
        self.complete(outcome);
        Ok(())
    }

    /// Switches the rendering. A brand skin without a description falls back to
    /// the full analysis. Returns the mode now shown.
    pub fn switch_mode(&mut self, requested: DisplayMode) -> Result<DisplayMode, ViewError> {
        let Some(result) = self.state.analysis_result.as_ref() else {
            return Err(ViewError::NoResult);
        };
        if requested == self.state.display_mode {
            return Ok(requested);
        }
        let effective = match requested.brand() {
            Some(brand) if result.layout_description(brand).is_none() => {
                warn!(mode = %requested, "layout description is blank, showing full analysis");
                DisplayMode::Analysis
            }
            _ => requested,
        };
        self.state.display_mode = effective;
        Ok(effective)
    }

    fn ensure_usable(&self) -> Result<(), ViewError> {
        if self.state.environment_unavailable {
            return Err(ViewError::EnvironmentUnavailable);
        }
        if self.state.is_loading {
            return Err(ViewError::AlreadyLoading);
        }
        Ok(())
    }

    fn record_error(&mut self, err: AnalysisError) {
        warn!(kind = err.kind(), "{err}");
        if err.clears_key_selection() {
            self.state.is_key_selected = false;
        }
        if err.is_terminal() {
            self.state.environment_unavailable = true;
            self.state.is_key_selected = false;
        }
        self.state.last_error = Some(err.to_string());
    }
}
