//! Artifact persistence.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sitesmith_core::GenerationArtifact;

use crate::error::StoreError;

/// Persistence boundary for finished artifacts.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// # Errors
    ///
    /// Returns [`StoreError`] when the artifact could not be written.
    async fn save(&self, slug: &str, artifact: &GenerationArtifact) -> Result<(), StoreError>;
}

/// Writes `<root>/<slug>/index.html` and `<root>/<slug>/artifact.json`.
#[derive(Debug, Clone)]
pub struct FileArtifactStore {
    root: PathBuf,
}

impl FileArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory an artifact with `slug` is written to.
    #[must_use]
    pub fn artifact_dir(&self, slug: &str) -> PathBuf {
        self.root.join(slug)
    }
}

fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

async fn write_file(path: PathBuf, contents: &[u8]) -> Result<(), StoreError> {
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| StoreError::Io { path, source })
}

#[async_trait]
impl ArtifactStore for FileArtifactStore {
    async fn save(&self, slug: &str, artifact: &GenerationArtifact) -> Result<(), StoreError> {
        if !is_safe_slug(slug) {
            return Err(StoreError::InvalidSlug(slug.to_string()));
        }
        let dir = self.artifact_dir(slug);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StoreError::Io {
                path: dir.clone(),
                source,
            })?;

        // The metadata describes the artifact as it exists on disk.
        let metadata = serde_json::to_vec_pretty(&GenerationArtifact {
            persisted: true,
            ..artifact.clone()
        })?;
        write_file(dir.join("index.html"), artifact.document.as_bytes()).await?;
        write_file(dir.join("artifact.json"), &metadata).await?;

        tracing::info!(slug, dir = %dir.display(), "artifact saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_must_be_path_safe() {
        assert!(is_safe_slug("acme-plumbing-2"));
        assert!(!is_safe_slug(""));
        assert!(!is_safe_slug("../etc"));
        assert!(!is_safe_slug("Acme"));
    }
}
