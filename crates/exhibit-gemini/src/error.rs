use exhibit_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Gemini API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("API key not set (expected GEMINI_API_KEY or GOOGLE_API_KEY)")]
    MissingApiKey,

    #[error("No candidates in response")]
    NoCandidates,
}

impl From<GeminiError> for CoreError {
    fn from(err: GeminiError) -> Self {
        CoreError::Backend(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GeminiError>;
