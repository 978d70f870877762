//! Generative model trait for exhibit-core
//!
//! Every role in the exhibition talks to a hosted model through this one
//! seam, so the curator and audience never see HTTP or wire formats.

use crate::{GenerateRequest, GenerateResponse, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// A model that turns multimodal content into multimodal content
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Run a single generation call
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Optional method to get model metadata
    fn metadata(&self) -> ModelMetadata {
        ModelMetadata::default()
    }
}

/// Metadata about a model backend
#[derive(Debug, Clone, Default)]
pub struct ModelMetadata {
    /// Human-readable backend name
    pub name: Option<String>,
    /// Endpoint the backend talks to
    pub endpoint: Option<String>,
    /// Version information
    pub version: Option<String>,
}

/// Arc-wrapped model for thread-safe sharing
pub type SharedModel = Arc<dyn GenerativeModel>;

/// Extension trait for model handles
pub trait GenerativeModelExt: GenerativeModel {
    /// Convert to a shared model
    fn shared(self) -> SharedModel
    where
        Self: Sized + 'static,
    {
        Arc::new(self)
    }
}

impl<T: GenerativeModel> GenerativeModelExt for T {}

#[async_trait]
impl<T: GenerativeModel + ?Sized> GenerativeModel for Arc<T> {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        (**self).generate(request).await
    }

    fn metadata(&self) -> ModelMetadata {
        (**self).metadata()
    }
}
