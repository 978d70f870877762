//! AI exhibition
//!
//! A curator process writes curatorial statements and commissions triptych
//! images from a hosted generative model; audience processes react to the
//! newest image. The roles only meet through text and image files on disk.

pub mod app;
pub mod audience;
pub mod config;
pub mod curator;
pub mod error;
pub mod feedback;
pub mod gallery;
pub mod monitor;
pub mod prompts;
pub mod schedule;
pub mod storage;
pub mod triptych;

// Re-export core types
pub use exhibit_core::{
    Blob, CoreError, GenerateRequest, GenerateResponse, GenerativeModel, GenerativeModelExt,
    ModelMetadata, Part, SharedModel, extract_captions,
};

pub use app::{Exhibition, ExhibitionBuilder};
pub use audience::{Audience, CommentOutcome};
pub use config::ExhibitConfig;
pub use curator::{Curator, Exhibit, Statement};
pub use error::{ExhibitError, Result};
pub use monitor::Monitor;
pub use schedule::{Schedule, ScheduleWindow};

// Feature-gated re-exports
#[cfg(feature = "gemini")]
pub use exhibit_gemini::GeminiClient;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::app::Exhibition;
    pub use crate::config::ExhibitConfig;
    pub use exhibit_core::{GenerateRequest, GenerateResponse, GenerativeModel};
}
