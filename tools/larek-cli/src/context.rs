//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use larek_data::{FetchClient, HttpTransport, LarekApi, RetryPolicy};
use tracing::debug;

use crate::config::LarekConfig;
use crate::output::Output;

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["larek.toml", ".larek.toml", "larek.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: LarekConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            LarekConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd)?.unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    ///
    /// The first file found wins; a file that fails to load is an error.
    fn find_config(start: &Path) -> Result<Option<LarekConfig>> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    debug!(path = %config_path.display(), "using config file");
                    let path = config_path.to_string_lossy();
                    let config = LarekConfig::load(&path)
                        .with_context(|| format!("Invalid config file: {}", path))?;
                    return Ok(Some(config));
                }
            }

            if !current.pop() {
                break;
            }
        }

        debug!("no config file found, using defaults");
        Ok(None)
    }

    /// Shop API client built from the `[api]` section.
    pub fn api(&self) -> Result<LarekApi> {
        let transport =
            HttpTransport::new(self.config.api.timeout()).context("Failed to create HTTP client")?;
        let client = FetchClient::new(Arc::new(transport))
            .with_base_url(self.config.api.base_url.as_str())
            .with_retry_policy(RetryPolicy::new(self.config.api.max_retries));
        Ok(LarekApi::new(client))
    }
}
