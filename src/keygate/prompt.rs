use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use dialoguer::Password;

use crate::keygate::{KeyCapability, SharedCredential};

/// Asks for the key on the controlling terminal with hidden input.
#[derive(Debug, Clone)]
pub struct PromptKeyCapability {
    credential: SharedCredential,
}

impl PromptKeyCapability {
    pub fn new(credential: SharedCredential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl KeyCapability for PromptKeyCapability {
    fn name(&self) -> &str {
        "prompt"
    }

    async fn has_selected_api_key(&self) -> bool {
        self.credential.is_present()
    }

    async fn open_select_key(&self) -> Result<()> {
        let key = tokio::task::spawn_blocking(|| {
            Password::new()
                .with_prompt("Gemini API key (billing: https://ai.google.dev/gemini-api/docs/billing)")
                .interact()
        })
        .await
        .map_err(|err| anyhow!("key prompt task failed: {err}"))?
        .context("failed reading API key from terminal")?;
        if key.trim().is_empty() {
            bail!("no API key entered");
        }
        self.credential.set(key);
        Ok(())
    }
}
