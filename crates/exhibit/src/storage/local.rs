use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::traits::FileMetadata;
use super::{Storage, StorageError, StorageResult};
use crate::config::ExhibitConfig;

/// Local filesystem storage implementation
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Create LocalStorage from ExhibitConfig
    pub fn from_config(config: &ExhibitConfig) -> Self {
        Self::new(&config.base_dir)
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get full path by joining base path with relative path
    fn full_path(&self, path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.base_path.join(relative))
    }

    async fn ensure_parent(full_path: &Path) -> StorageResult<()> {
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let full_path = self.full_path(path)?;
        Ok(fs::try_exists(&full_path).await?)
    }

    async fn read(&self, path: &str) -> StorageResult<Vec<u8>> {
        let full_path = self.full_path(path)?;
        match fs::read(&full_path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(path.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &str, content: &[u8]) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        Self::ensure_parent(&full_path).await?;

        let mut file = fs::File::create(&full_path).await?;
        file.write_all(content).await?;
        file.sync_all().await?;
        Ok(())
    }

    async fn append(&self, path: &str, content: &[u8]) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        Self::ensure_parent(&full_path).await?;

        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full_path)
            .await?;
        file.write_all(content).await?;
        file.flush().await?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>> {
        let full_path = self.full_path(prefix)?;

        if !full_path.exists() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        let mut read_dir = fs::read_dir(&full_path).await?;

        while let Some(entry) = read_dir.next_entry().await? {
            if let Ok(relative) = entry.path().strip_prefix(&self.base_path) {
                let mut path_str = relative.to_string_lossy().replace('\\', "/");

                // Add trailing slash for directories
                if entry.file_type().await?.is_dir() {
                    path_str.push('/');
                }

                entries.push(path_str);
            }
        }

        entries.sort();
        Ok(entries)
    }

    async fn create_dir(&self, path: &str) -> StorageResult<()> {
        let full_path = self.full_path(path)?;
        fs::create_dir_all(&full_path).await?;
        Ok(())
    }

    async fn metadata(&self, path: &str) -> StorageResult<FileMetadata> {
        let full_path = self.full_path(path)?;
        let metadata = match fs::metadata(&full_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(path.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(FileMetadata {
            size: metadata.len(),
            modified: metadata.modified().ok().map(chrono::DateTime::from),
            is_dir: metadata.is_dir(),
        })
    }
}
