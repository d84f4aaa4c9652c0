//! Unified path management for client state files.
//!
//! The persisted token and the optional client configuration live under one
//! well-known directory so they can be cleared or inspected together.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Path resolution for ExpenSight client state.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/expensight/        # Config directory (XDG on Linux/macOS)
/// ├── config.toml              # Client configuration (API base URL)
/// └── token.json               # Persisted access token
/// ```
pub struct ExpensightPaths;

impl ExpensightPaths {
    /// Returns the client configuration directory.
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join("expensight"))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the client configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted token file.
    ///
    /// The file holds the opaque access token; keep its permissions tight.
    pub fn token_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("token.json"))
    }
}
