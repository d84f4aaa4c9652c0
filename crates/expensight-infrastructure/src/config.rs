//! Client configuration.
//!
//! Resolution priority: `EXPENSIGHT_API_URL` environment variable, then
//! `config.toml` under the client config directory, then the built-in
//! default. A missing or empty file falls through to the default rather
//! than failing startup.

use crate::paths::ExpensightPaths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/v1";

/// Client-side configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the remote authority, including the API version prefix.
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the default location with env override.
    pub fn load() -> Self {
        let from_file = ExpensightPaths::config_file()
            .ok()
            .map(|path| Self::from_file(&path))
            .unwrap_or_default();
        from_file.with_override(std::env::var("EXPENSIGHT_API_URL").ok())
    }

    /// Loads configuration from a specific file, falling back to defaults
    /// when the file is missing or unparsable.
    pub fn from_file(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => match toml::from_str::<ClientConfig>(&text) {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!(
                        "[ClientConfig] Ignoring unparsable config at {:?}: {}",
                        path,
                        e
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Applies the `EXPENSIGHT_API_URL` override, if present and non-empty.
    fn with_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            if !url.trim().is_empty() {
                self.api_base_url = url;
            }
        }
        self
    }
}
