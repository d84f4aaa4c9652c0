//! File-backed token persistence.
//!
//! Stores the access token as a small JSON document and writes it
//! atomically (temp file + fsync + rename) so the persisted credential is
//! never observable half-written, even across crashes.

use expensight_core::token::{TokenStore, TokenStoreError};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

/// On-disk shape of the token file.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedToken {
    access_token: String,
}

/// `TokenStore` implementation backed by a single JSON file.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store around the given token file path.
    ///
    /// The parent directory is created on first `save`, not here, so a
    /// read-only environment can still construct the store and `load`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, TokenStoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let persisted: PersistedToken = serde_json::from_str(&json)?;
        Ok(Some(persisted.access_token))
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&PersistedToken {
            access_token: token.to_string(),
        })?;

        // Write to a sibling temp file, fsync, then rename over the target
        // so readers only ever see the old or the new token.
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut tmp = File::create(&tmp_path)?;
            tmp.write_all(json.as_bytes())?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
