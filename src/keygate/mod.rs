pub mod env;
pub mod prompt;

use std::fmt::{Debug, Formatter};
use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{KeyConfig, KeySource};
use crate::keygate::env::EnvKeyCapability;
use crate::keygate::prompt::PromptKeyCapability;

/// Host-side API key management.
#[async_trait]
pub trait KeyCapability: Send + Sync {
    fn name(&self) -> &str;
    async fn has_selected_api_key(&self) -> bool;
    /// Runs the interactive selection flow. Success means a key is assumed usable.
    async fn open_select_key(&self) -> Result<()>;
}

/// API key shared between the host capability that selects it and the
/// backend that sends it.
#[derive(Clone, Default)]
pub struct SharedCredential {
    inner: Arc<RwLock<Option<String>>>,
}

impl SharedCredential {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        let credential = Self::new();
        credential.set(key);
        credential
    }

    pub fn set(&self, key: impl Into<String>) {
        let key = key.into();
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(key.trim().to_string()).filter(|k| !k.is_empty());
    }

    pub fn get(&self) -> Option<String> {
        let guard = self.inner.read().unwrap_or_else(|e| e.into_inner());
        guard.clone()
    }

    pub fn is_present(&self) -> bool {
        self.get().is_some()
    }
}

impl Debug for SharedCredential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let state = if self.is_present() { "<set>" } else { "<unset>" };
        f.debug_tuple("SharedCredential").field(&state).finish()
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyGateError {
    #[error("API key environment not detected. Configure a key source (env or prompt) and restart.")]
    EnvironmentUnavailable,
    #[error("Failed to open API key selection: {0}")]
    KeySelectionFailed(String),
}

/// Ensures a credential is selected before any backend call.
pub struct KeyGate {
    capability: Option<Arc<dyn KeyCapability>>,
    selected: AtomicBool,
}

impl KeyGate {
    pub fn new(capability: Option<Arc<dyn KeyCapability>>) -> Self {
        Self {
            capability,
            selected: AtomicBool::new(false),
        }
    }

    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn is_selected(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    pub fn mark_unselected(&self) {
        self.selected.store(false, Ordering::SeqCst);
    }

    pub async fn check_key_presence(&self) -> std::result::Result<bool, KeyGateError> {
        let capability = self
            .capability
            .as_ref()
            .ok_or(KeyGateError::EnvironmentUnavailable)?;
        let selected = capability.has_selected_api_key().await;
        debug!(capability = capability.name(), selected, "checked API key presence");
        self.selected.store(selected, Ordering::SeqCst);
        Ok(selected)
    }

    pub async fn prompt_key_selection(&self) -> std::result::Result<(), KeyGateError> {
        let capability = self
            .capability
            .as_ref()
            .ok_or(KeyGateError::EnvironmentUnavailable)?;
        match capability.open_select_key().await {
            Ok(()) => {
                info!(capability = capability.name(), "API key selected");
                self.selected.store(true, Ordering::SeqCst);
                Ok(())
            }
            Err(err) => {
                warn!(capability = capability.name(), "API key selection failed: {err:#}");
                Err(KeyGateError::KeySelectionFailed(format!("{err:#}")))
            }
        }
    }
}

impl Debug for KeyGate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyGate")
            .field(
                "capability",
                &self.capability.as_ref().map(|c| c.name().to_string()),
            )
            .field("selected", &self.is_selected())
            .finish()
    }
}

/// Builds the host capability named by the config, or `None` when the
/// configured source cannot work in this process.
pub fn capability_from_config(
    config: &KeyConfig,
    credential: SharedCredential,
) -> Option<Arc<dyn KeyCapability>> {
    match config.source {
        KeySource::Env => Some(Arc::new(EnvKeyCapability::new(
            config.env_var.clone(),
            Some(config.resolved_key_file()),
            credential,
        ))),
        KeySource::Prompt => {
            if !std::io::stdin().is_terminal() {
                warn!("key source is prompt but stdin is not a terminal");
                return None;
            }
            Some(Arc::new(PromptKeyCapability::new(credential)))
        }
        KeySource::Disabled => None,
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::testing::FakeCapability;
    use super::{KeyGate, KeyGateError, SharedCredential};

    #[tokio::test]
    async fn missing_capability_is_environment_unavailable() {
        let gate = KeyGate::unavailable();
        assert_eq!(
            gate.check_key_presence().await,
            Err(KeyGateError::EnvironmentUnavailable)
        );
        assert_eq!(
            gate.prompt_key_selection().await,
            Err(KeyGateError::EnvironmentUnavailable)
        );
        assert!(!gate.is_selected());
    }

    #[tokio::test]
    async fn presence_check_reflects_capability() {
        let gate = KeyGate::new(Some(Arc::new(FakeCapability::default())));
        assert_eq!(gate.check_key_presence().await, Ok(false));

        let gate = KeyGate::new(Some(Arc::new(FakeCapability::selected())));
        assert_eq!(gate.check_key_presence().await, Ok(true));
        assert!(gate.is_selected());
    }

    #[tokio::test]
    async fn successful_selection_marks_key_selected() {
        let fake = Arc::new(FakeCapability::default());
        let gate = KeyGate::new(Some(fake.clone()));
        tokio_test::assert_ok!(gate.prompt_key_selection().await);
        assert!(gate.is_selected());
        assert_eq!(fake.select_calls(), 1);
    }

    #[tokio::test]
    async fn failed_selection_leaves_state_unselected() {
        let gate = KeyGate::new(Some(Arc::new(FakeCapability::failing())));
        let err = tokio_test::assert_err!(gate.prompt_key_selection().await);
        assert!(matches!(err, KeyGateError::KeySelectionFailed(ref msg) if msg.contains("dismissed")));
        assert!(!gate.is_selected());
    }

    #[test]
    fn shared_credential_trims_and_redacts() {
        let credential = SharedCredential::with_key("  abc123 \n");
        assert_eq!(credential.get().as_deref(), Some("abc123"));
        assert!(!format!("{credential:?}").contains("abc123"));
        credential.set("   ");
        assert!(!credential.is_present());
    }
}
