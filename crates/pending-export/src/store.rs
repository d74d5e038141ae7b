//! Storage for rendered workbooks awaiting download

use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::{ExportError, ExportResult};

/// Where rendered artifacts live between the upload and the download
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store `bytes` under `name` and return the location written
    async fn save(&self, name: &str, bytes: &[u8]) -> ExportResult<PathBuf>;

    /// Read back a stored artifact
    async fn load(&self, name: &str) -> ExportResult<Vec<u8>>;

    /// Delete a stored artifact; missing artifacts are not an error
    async fn remove(&self, name: &str) -> ExportResult<()>;
}

/// Artifact names are single path components
pub fn validate_artifact_name(name: &str) -> ExportResult<()> {
    let invalid = name.is_empty()
        || name.contains(['/', '\\', '\0'])
        || name.contains("..")
        || name.starts_with('.');
    if invalid {
        return Err(ExportError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Artifacts kept as files in one directory
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    root: PathBuf,
}

impl LocalArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, name: &str) -> ExportResult<PathBuf> {
        validate_artifact_name(name)?;
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn save(&self, name: &str, bytes: &[u8]) -> ExportResult<PathBuf> {
        let path = self.path_for(name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;
        log::info!("Wrote artifact {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }

    async fn load(&self, name: &str) -> ExportResult<Vec<u8>> {
        let path = self.path_for(name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ExportError::NotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn remove(&self, name: &str) -> ExportResult<()> {
        let path = self.path_for(name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
