//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LarekConfig {
    /// Shop API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

impl LarekConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::parse(path, &content)
    }

    fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Shop API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API root; `/product` and `/order` are appended.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// CDN root for product images.
    #[serde(default = "default_cdn_url")]
    pub cdn_url: String,

    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries for catalog fetches. Orders are never retried.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_base_url() -> String {
    "https://larek-api.nomoreparties.co/api/weblarek".to_string()
}

fn default_cdn_url() -> String {
    "https://larek-api.nomoreparties.co/content/weblarek".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    2
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            cdn_url: default_cdn_url(),
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

impl ApiConfig {
    /// Replace URLs given on the command line or in the environment.
    pub fn apply_overrides(&mut self, base_url: Option<String>, cdn_url: Option<String>) {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(url) = cdn_url {
            self.cdn_url = url;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Generate a default larek.toml config file.
pub fn generate_default_config() -> String {
    let api = ApiConfig::default();
    format!(
        r#"# Larek storefront configuration

[api]
base_url = "{base_url}"
cdn_url = "{cdn_url}"
timeout_ms = {timeout_ms}
# Retries apply to catalog fetches only
max_retries = {max_retries}
"#,
        base_url = api.base_url,
        cdn_url = api.cdn_url,
        timeout_ms = api.timeout_ms,
        max_retries = api.max_retries,
    )
}
