//! Gemini integration for the AI exhibition
//!
//! Implements [`exhibit_core::GenerativeModel`] over the Generative Language
//! REST API so curator and audience can run against hosted Gemini models.

pub mod client;
pub mod error;
mod wire;

pub use client::{API_KEY_VARS, DEFAULT_BASE_URL, GeminiClient};
pub use error::{GeminiError, Result};
