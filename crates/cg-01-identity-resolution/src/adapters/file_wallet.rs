//! File-system wallet adapter.
//!
//! Reads the wallet directory layout produced by the enrollment tooling:
//! one `<name>.id` file per principal, each holding a JSON identity record.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::IdentityRecord;
use crate::ports::{MembershipRegistry, RegistryError};

const IDENTITY_EXTENSION: &str = "id";

/// A wallet directory on local disk.
pub struct FileWallet {
    dir: PathBuf,
}

impl FileWallet {
    /// Open a wallet rooted at `dir`. The directory is not touched until
    /// the first lookup.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The wallet directory.
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }
}

#[async_trait]
impl MembershipRegistry for FileWallet {
    /// Principal names, sorted lexicographically.
    ///
    /// Directory iteration order is platform-dependent; sorting keeps the
    /// first-match policy deterministic across hosts.
    async fn list(&self) -> Result<Vec<String>, RegistryError> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(IDENTITY_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    async fn get(&self, name: &str) -> Result<Option<IdentityRecord>, RegistryError> {
        let path = self.dir.join(format!("{name}.{IDENTITY_EXTENSION}"));
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RegistryError::Unavailable(e.to_string())),
        };

        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| RegistryError::CorruptRecord {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}
