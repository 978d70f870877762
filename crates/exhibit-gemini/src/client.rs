use async_trait::async_trait;
use exhibit_core::{GenerateRequest, GenerateResponse, GenerativeModel, ModelMetadata};
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{GeminiError, Result};
use crate::wire::{WireResponse, decode_response, encode_request};

/// Public Generative Language API endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variables checked for the API key, in order
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Gemini `generateContent` client
///
/// ```no_run
/// use exhibit_gemini::GeminiClient;
/// use std::time::Duration;
///
/// let client = GeminiClient::from_env()
///     .unwrap()
///     .with_timeout(Duration::from_secs(120));
/// ```
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client with an explicit API key
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        })
    }

    /// Create a client from `GEMINI_API_KEY` or `GOOGLE_API_KEY`
    pub fn from_env() -> Result<Self> {
        let api_key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .ok_or(GeminiError::MissingApiKey)?;
        Self::new(api_key)
    }

    /// Point the client at another host (proxies, tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    /// Call `generateContent` and decode the first candidate
    pub async fn generate_content(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = self.endpoint(&request.model);
        debug!(request_id = %request.id, model = %request.model, parts = request.parts.len(), "Calling Gemini");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&encode_request(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Gemini request rejected");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: WireResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::Decode(format!("Failed to parse response: {}", e)))?;

        decode_response(request.id.clone(), body)
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> exhibit_core::Result<GenerateResponse> {
        Ok(self.generate_content(&request).await?)
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: Some("Gemini".to_string()),
            endpoint: Some(self.base_url.clone()),
            version: Some("v1beta".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            GeminiClient::new("  "),
            Err(GeminiError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_format() {
        let client = GeminiClient::new("key")
            .unwrap()
            .with_base_url("http://localhost:8080/");
        assert_eq!(
            client.endpoint("gemini-2.0-flash"),
            "http://localhost:8080/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let client = GeminiClient::new("secret-key").unwrap();
        assert!(!format!("{:?}", client).contains("secret-key"));
    }
}
