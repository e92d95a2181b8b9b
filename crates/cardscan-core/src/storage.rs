//! Upload persistence for scanned card images.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::StorageError;
use crate::models::config::StorageConfig;

/// A stored upload and the URL it is served under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub path: PathBuf,
    pub url: String,
}

/// Anything that can persist an uploaded file and hand back its location.
pub trait UploadStore {
    /// Store `bytes` under `file_name`.
    fn put(&self, file_name: &str, bytes: &[u8]) -> Result<StoredUpload, StorageError>;
}

/// Stores uploads in a local directory.
pub struct LocalUploadStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalUploadStore {
    /// Create a store rooted at `root`, serving files under `public_base_url`.
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Create a store from configuration.
    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.upload_dir, &config.public_base_url)
    }

    /// Storage root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.public_base_url.trim_end_matches('/'), file_name)
    }
}

impl UploadStore for LocalUploadStore {
    fn put(&self, file_name: &str, bytes: &[u8]) -> Result<StoredUpload, StorageError> {
        validate_name(file_name)?;

        fs::create_dir_all(&self.root)?;
        let path = self.root.join(file_name);
        if path.exists() {
            warn!("Overwriting existing upload {}", path.display());
        }
        fs::write(&path, bytes)?;

        let url = self.url_for(file_name);
        info!("Stored upload {} ({} bytes)", path.display(), bytes.len());

        Ok(StoredUpload { path, url })
    }
}

/// Upload names are plain file names: no separators, no parent references.
fn validate_name(file_name: &str) -> Result<(), StorageError> {
    let trimmed = file_name.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed.contains("..")
        || trimmed.contains(['/', '\\'])
    {
        return Err(StorageError::InvalidName(file_name.to_string()));
    }
    Ok(())
}
