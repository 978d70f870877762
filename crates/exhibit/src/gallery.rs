//! The shared images directory
//!
//! The curator drops timestamped images here; audiences always look at
//! the most recently modified one.

use chrono::{DateTime, NaiveDateTime, Utc};
use exhibit_core::Blob;
use std::sync::Arc;

use crate::Result;
use crate::storage::Storage;

pub const IMAGE_PREFIX: &str = "generated_exhibition_";
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// File name for an image generated at `at`
pub fn image_file_name(at: NaiveDateTime, extension: &str) -> String {
    format!("{}{}.{}", IMAGE_PREFIX, at.format("%Y%m%d_%H%M%S"), extension)
}

/// Whether a path looks like an exhibition image (by extension)
pub fn is_image(path: &str) -> bool {
    path.rsplit_once('.')
        .map(|(_, ext)| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// MIME type for an image path
pub fn mime_type(path: &str) -> &'static str {
    match path.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        _ => "image/png",
    }
}

/// An image in the gallery
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRef {
    /// Path relative to the storage root
    pub path: String,
    /// Bare file name, the key used in feedback logs
    pub name: String,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Clone)]
pub struct Gallery {
    storage: Arc<dyn Storage>,
    images_dir: String,
}

impl Gallery {
    pub fn new(storage: Arc<dyn Storage>, images_dir: impl Into<String>) -> Self {
        Self {
            storage,
            images_dir: images_dir.into(),
        }
    }

    pub fn images_dir(&self) -> &str {
        &self.images_dir
    }

    /// Make sure the images directory exists
    pub async fn prepare(&self) -> Result<()> {
        self.storage.create_dir(&self.images_dir).await?;
        Ok(())
    }

    /// Store a generated image under its timestamped name
    pub async fn save(&self, image: &Blob, at: NaiveDateTime) -> Result<ImageRef> {
        let name = image_file_name(at, image.extension());
        let path = format!("{}/{}", self.images_dir, name);
        self.storage.write(&path, &image.data).await?;
        let modified = self.storage.metadata(&path).await?.modified;
        Ok(ImageRef {
            path,
            name,
            modified,
        })
    }

    /// Most recently modified image; ties go to the greater file name
    pub async fn latest(&self) -> Result<Option<ImageRef>> {
        let mut latest: Option<ImageRef> = None;

        for path in self.storage.list(&self.images_dir).await? {
            if path.ends_with('/') || !is_image(&path) {
                continue;
            }
            let modified = self.storage.metadata(&path).await?.modified;
            let name = path.rsplit('/').next().unwrap_or(&path).to_string();
            let candidate = ImageRef {
                path,
                name,
                modified,
            };

            let newer = match &latest {
                None => true,
                Some(current) => {
                    (candidate.modified, &candidate.name) > (current.modified, &current.name)
                }
            };
            if newer {
                latest = Some(candidate);
            }
        }

        Ok(latest)
    }

    pub async fn read(&self, image: &ImageRef) -> Result<Blob> {
        let data = self.storage.read(&image.path).await?;
        Ok(Blob::new(mime_type(&image.path), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use chrono::NaiveDate;
    use std::time::{Duration, SystemTime};

    #[test]
    fn test_image_file_name() {
        let at = NaiveDate::from_ymd_opt(2025, 5, 1)
            .unwrap()
            .and_hms_opt(12, 35, 7)
            .unwrap();
        assert_eq!(
            image_file_name(at, "png"),
            "generated_exhibition_20250501_123507.png"
        );
    }

    #[test]
    fn test_image_extension_filter() {
        assert!(is_image("GeneratedImages/a.png"));
        assert!(is_image("GeneratedImages/a.JPEG"));
        assert!(is_image("a.jpg"));
        assert!(!is_image("a.txt"));
        assert!(!is_image("png"));
        assert_eq!(mime_type("a.JPG"), "image/jpeg");
        assert_eq!(mime_type("a.png"), "image/png");
    }

    fn touch(path: &std::path::Path, secs_ago: u64) {
        let file = std::fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
            .unwrap();
    }

    #[tokio::test]
    async fn test_latest_by_modified_time() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let gallery = Gallery::new(storage.clone(), "imgs");

        storage.write("imgs/z_old.png", b"old").await.unwrap();
        storage.write("imgs/a_new.jpg", b"new").await.unwrap();
        storage.write("imgs/notes.txt", b"skip").await.unwrap();
        touch(&dir.path().join("imgs/z_old.png"), 600);
        touch(&dir.path().join("imgs/a_new.jpg"), 10);
        touch(&dir.path().join("imgs/notes.txt"), 0);

        let latest = gallery.latest().await.unwrap().unwrap();
        assert_eq!(latest.name, "a_new.jpg");
        assert_eq!(latest.path, "imgs/a_new.jpg");

        let blob = gallery.read(&latest).await.unwrap();
        assert_eq!(blob.mime_type, "image/jpeg");
        assert_eq!(blob.data, b"new".to_vec());
    }

    #[tokio::test]
    async fn test_latest_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        let gallery = Gallery::new(Arc::new(LocalStorage::new(dir.path())), "imgs");
        assert!(gallery.latest().await.unwrap().is_none());
        gallery.prepare().await.unwrap();
        assert!(gallery.latest().await.unwrap().is_none());
    }
}
