//! CLI commands.

pub mod account;
pub mod init;
pub mod list;
pub mod run;

use anyhow::{Context, Result};
use apicheck_core::{ApiClient, Config};
use std::path::Path;

/// Loads the config and applies command-line overrides.
pub fn load_config(path: &Path, base_url: Option<&str>) -> Result<Config> {
    let mut config = Config::load(path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    if let Some(url) = base_url {
        config.target.base_url = url.to_string();
    }
    Ok(config)
}

/// Builds an HTTP client for the configured target.
pub fn client(config: &Config) -> Result<ApiClient> {
    ApiClient::new(&config.target).context("Failed to build HTTP client")
}
