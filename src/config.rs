use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub key: KeyConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

/// Where the API key comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeySource {
    Env,
    Prompt,
    #[serde(rename = "none")]
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyConfig {
    #[serde(default = "default_key_source")]
    pub source: KeySource,
    #[serde(default = "default_env_var")]
    pub env_var: String,
    #[serde(default = "default_key_file")]
    pub key_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_true")]
    pub color: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub key_source: Option<KeySource>,
    pub bind: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(model) = overrides.model {
            self.backend.model = model;
        }
        if let Some(base_url) = overrides.base_url {
            self.backend.base_url = base_url;
        }
        if let Some(source) = overrides.key_source {
            self.key.source = source;
        }
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[backend]
base_url = "https://generativelanguage.googleapis.com"
model = "gemini-3-pro-preview"
timeout_secs = 300
connect_timeout_secs = 10

[key]
# env: read GEMINI_API_KEY (or key_file); prompt: ask on the terminal; none: disabled
source = "env"
env_var = "GEMINI_API_KEY"
key_file = "~/.config/strategy-generator/api_key"

[server]
bind = "127.0.0.1:8080"

[output]
format = "text"
mode = "analysis"
color = true
"#;
        template.to_string()
    }
}

impl KeyConfig {
    pub fn resolved_key_file(&self) -> PathBuf {
        expand_tilde(&self.key_file)
    }
}

fn config_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".config/strategy-generator")
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            source: default_key_source(),
            env_var: default_env_var(),
            key_file: default_key_file(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            mode: default_mode(),
            color: true,
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_key_source() -> KeySource {
    KeySource::Env
}

fn default_env_var() -> String {
    "GEMINI_API_KEY".to_string()
}

fn default_key_file() -> String {
    "~/.config/strategy-generator/api_key".to_string()
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_mode() -> String {
    "analysis".to_string()
}

fn default_true() -> bool {
    true
}
