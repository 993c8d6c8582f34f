//! Configuration types for harness runs.

use crate::error::{HarnessError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "apicheck.toml";

/// Comprehensive configuration for a harness run.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Where the API under test lives.
    #[serde(default)]
    pub target: TargetConfig,

    /// Credentials used to establish the run's session.
    #[serde(default)]
    pub account: AccountConfig,

    /// Inputs for the standard scenario suite.
    #[serde(default)]
    pub suite: SuiteConfig,
}

impl Config {
    /// Load configuration from a file, falling back to defaults when it is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .map_err(|e| HarnessError::Config(format!("failed to read config: {}", e)))?;
            toml::from_str(&content)
                .map_err(|e| HarnessError::Config(format!("failed to parse config: {}", e)))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| HarnessError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| HarnessError::Config(format!("failed to write config: {}", e)))?;
        Ok(())
    }
}

/// Target API configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL of the API, without a trailing path (default: http://localhost:3000).
    pub base_url: String,

    /// Route prefix under which writes require a token (default: "/664").
    pub protected_prefix: String,

    /// Per-request timeout in seconds (default: 30).
    pub timeout_secs: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            protected_prefix: "/664".to_string(),
            timeout_secs: 30,
        }
    }
}

impl TargetConfig {
    /// Returns the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Account configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccountConfig {
    /// Email address. When registering, a timestamp is spliced in before the '@'.
    pub email: String,

    /// Password used for signup or login.
    pub password: String,

    /// Sign up a fresh user (true) or log in with existing credentials (false).
    pub register: bool,
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            email: "tester@example.com".to_string(),
            password: crate::user::DEFAULT_PASSWORD.to_string(),
            register: true,
        }
    }
}

/// Inputs for the standard suite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuiteConfig {
    /// Limit used by the limited-list scenario (default: 10).
    pub list_limit: usize,

    /// Ids fetched by the list-by-ids scenario (default: [55, 60]).
    pub lookup_ids: Vec<u64>,

    /// An id that must not exist on the server (default: 999999).
    pub missing_id: u64,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            list_limit: 10,
            lookup_ids: vec![55, 60],
            missing_id: 999_999,
        }
    }
}
