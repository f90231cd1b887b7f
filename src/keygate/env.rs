use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use async_trait::async_trait;
use tracing::debug;

use crate::keygate::{KeyCapability, SharedCredential};

/// Reads the key from an environment variable, falling back to a key file.
#[derive(Debug, Clone)]
pub struct EnvKeyCapability {
    env_var: String,
    key_file: Option<PathBuf>,
    credential: SharedCredential,
}

impl EnvKeyCapability {
    pub fn new(env_var: String, key_file: Option<PathBuf>, credential: SharedCredential) -> Self {
        Self {
            env_var,
            key_file,
            credential,
        }
    }

    fn read_key(&self) -> Option<String> {
        if let Ok(value) = std::env::var(&self.env_var) {
            let value = value.trim();
            if !value.is_empty() {
                debug!(var = %self.env_var, "API key found in environment");
                return Some(value.to_string());
            }
        }
        let path = self.key_file.as_ref()?;
        match fs::read_to_string(path) {
            Ok(contents) => {
                let value = contents.trim();
                if value.is_empty() {
                    None
                } else {
                    debug!(path = %path.display(), "API key found in key file");
                    Some(value.to_string())
                }
            }
            Err(_) => None,
        }
    }

    fn describe_sources(&self) -> String {
        match &self.key_file {
            Some(path) => format!("${} or {}", self.env_var, path.display()),
            None => format!("${}", self.env_var),
        }
    }
}

#[async_trait]
impl KeyCapability for EnvKeyCapability {
    fn name(&self) -> &str {
        "env"
    }

    async fn has_selected_api_key(&self) -> bool {
        if self.credential.is_present() {
            return true;
        }
        match self.read_key() {
            Some(key) => {
                self.credential.set(key);
                true
            }
            None => false,
        }
    }

    async fn open_select_key(&self) -> Result<()> {
        let Some(key) = self.read_key() else {
            bail!("no API key found in {}", self.describe_sources());
        };
        self.credential.set(key);
        Ok(())
    }
}
