//! Request and Response types for exhibit-core

use serde::{Deserialize, Serialize};
use std::fmt;

/// NewType pattern for Request ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new RequestId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create from existing string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Output modality a model may be asked to produce
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Modality {
    Text,
    Image,
}

/// Inline binary payload (image bytes and their MIME type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Gallery file extension: `jpg` for JPEG, `png` for anything else
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" => "jpg",
            _ => "png",
        }
    }
}

/// One piece of multimodal content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Part {
    Text(String),
    InlineData(Blob),
}

impl Part {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::InlineData(_) => None,
        }
    }

    pub fn as_blob(&self) -> Option<&Blob> {
        match self {
            Part::InlineData(blob) => Some(blob),
            Part::Text(_) => None,
        }
    }
}

/// Sampling and output options for a generation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub response_modalities: Vec<Modality>,
}

impl GenerationConfig {
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_modalities(mut self, modalities: impl IntoIterator<Item = Modality>) -> Self {
        self.response_modalities = modalities.into_iter().collect();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.max_output_tokens.is_none()
            && self.temperature.is_none()
            && self.response_modalities.is_empty()
    }
}

/// Request sent to a generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Unique request ID
    pub id: RequestId,
    /// Model name understood by the backend
    pub model: String,
    /// Ordered user content
    pub parts: Vec<Part>,
    /// Generation options
    pub config: GenerationConfig,
}

impl GenerateRequest {
    /// Create an empty request for a model
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            model: model.into(),
            parts: Vec::new(),
            config: GenerationConfig::default(),
        }
    }

    /// Append a text part
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text(text.into()));
        self
    }

    /// Append an inline image part
    pub fn image(mut self, blob: Blob) -> Self {
        self.parts.push(Part::InlineData(blob));
        self
    }

    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }
}

/// Response from a generative model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Corresponding request ID
    pub request_id: RequestId,
    /// Content parts in the order the model produced them
    pub parts: Vec<Part>,
    /// Backend details
    pub metadata: Option<ResponseMetadata>,
}

/// Metadata for response details
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResponseMetadata {
    pub model_version: Option<String>,
    pub finish_reason: Option<String>,
}

impl GenerateResponse {
    /// Create a response holding a single text part
    pub fn simple(request_id: RequestId, text: impl Into<String>) -> Self {
        Self {
            request_id,
            parts: vec![Part::Text(text.into())],
            metadata: None,
        }
    }

    /// All text parts concatenated as produced
    pub fn text(&self) -> String {
        self.parts.iter().filter_map(Part::as_text).collect()
    }

    /// Every text part trimmed and terminated by a newline
    pub fn joined_text(&self) -> String {
        self.parts
            .iter()
            .filter_map(Part::as_text)
            .map(|text| format!("{}\n", text.trim()))
            .collect()
    }

    /// The last inline image in the response
    pub fn image(&self) -> Option<&Blob> {
        self.parts.iter().rev().find_map(Part::as_blob)
    }
}
