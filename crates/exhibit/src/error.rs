//! Error types for exhibit crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExhibitError {
    #[error("Core error: {0}")]
    Core(#[from] exhibit_core::CoreError),

    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),

    #[error("No images found in {0}, generate an exhibition first")]
    NoImages(String),

    #[error("Invalid schedule: {0}")]
    Schedule(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Build error: {0}")]
    Build(String),

    #[cfg(feature = "gemini")]
    #[error("Gemini error: {0}")]
    Gemini(#[from] exhibit_gemini::GeminiError),
}

pub type Result<T> = std::result::Result<T, ExhibitError>;
