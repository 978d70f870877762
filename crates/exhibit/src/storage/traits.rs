use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{StorageError, StorageResult};

/// Storage trait for the exhibition's file-based message passing
///
/// Paths are relative to the storage root and use `/` separators.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Check if a path exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Read file contents
    async fn read(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Write file contents, replacing any previous content
    async fn write(&self, path: &str, content: &[u8]) -> StorageResult<()>;

    /// Append to a file, creating it when missing
    async fn append(&self, path: &str, content: &[u8]) -> StorageResult<()>;

    /// List entries of a directory (directories end with `/`)
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Create directory
    async fn create_dir(&self, path: &str) -> StorageResult<()>;

    /// Get file metadata (size, modified time, etc.)
    async fn metadata(&self, path: &str) -> StorageResult<FileMetadata>;

    /// Read a UTF-8 text file
    async fn read_to_string(&self, path: &str) -> StorageResult<String> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).map_err(|_| StorageError::InvalidUtf8(path.to_string()))
    }

    /// Read a text file, `None` when it does not exist yet
    async fn read_optional(&self, path: &str) -> StorageResult<Option<String>> {
        if !self.exists(path).await? {
            return Ok(None);
        }
        self.read_to_string(path).await.map(Some)
    }
}

/// File metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileMetadata {
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
    pub is_dir: bool,
}
