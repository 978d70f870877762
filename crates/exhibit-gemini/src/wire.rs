//! JSON shapes of the `generateContent` endpoint

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use exhibit_core::{
    Blob, GenerateRequest, GenerateResponse, GenerationConfig, Modality, Part, RequestId,
    ResponseMetadata,
};
use serde::{Deserialize, Serialize};

use crate::error::{GeminiError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireRequest {
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, alias = "inline_data", skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<WireBlob>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireBlob {
    #[serde(alias = "mime_type")]
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub response_modalities: Vec<Modality>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireResponse {
    #[serde(default)]
    pub candidates: Vec<WireCandidate>,
    #[serde(default)]
    pub model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireCandidate {
    #[serde(default)]
    pub content: Option<WireContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl From<&GenerationConfig> for WireGenerationConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            max_output_tokens: config.max_output_tokens,
            temperature: config.temperature,
            response_modalities: config.response_modalities.clone(),
        }
    }
}

impl From<&Part> for WirePart {
    fn from(part: &Part) -> Self {
        match part {
            Part::Text(text) => Self {
                text: Some(text.clone()),
                inline_data: None,
            },
            Part::InlineData(blob) => Self {
                text: None,
                inline_data: Some(WireBlob {
                    mime_type: blob.mime_type.clone(),
                    data: STANDARD.encode(&blob.data),
                }),
            },
        }
    }
}

pub(crate) fn encode_request(request: &GenerateRequest) -> WireRequest {
    WireRequest {
        contents: vec![WireContent {
            role: Some("user".to_string()),
            parts: request.parts.iter().map(WirePart::from).collect(),
        }],
        generation_config: (!request.config.is_empty())
            .then(|| WireGenerationConfig::from(&request.config)),
    }
}

/// Keep the first candidate's parts; text and images in model order
pub(crate) fn decode_response(
    request_id: RequestId,
    response: WireResponse,
) -> Result<GenerateResponse> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or(GeminiError::NoCandidates)?;

    let mut parts = Vec::new();
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if let Some(blob) = part.inline_data {
            let data = STANDARD
                .decode(blob.data.as_bytes())
                .map_err(|e| GeminiError::Decode(format!("invalid inline data: {}", e)))?;
            parts.push(Part::InlineData(Blob::new(blob.mime_type, data)));
        } else if let Some(text) = part.text {
            parts.push(Part::Text(text));
        }
    }

    Ok(GenerateResponse {
        request_id,
        parts,
        metadata: Some(ResponseMetadata {
            model_version: response.model_version,
            finish_reason: candidate.finish_reason,
        }),
    })
}
