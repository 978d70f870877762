use exhibit_core::caption::WORKS_PER_EXHIBIT;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gallery::ImageRef;

/// Curatorial statement, `<topic> @ <text>` by convention
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement(String);

impl Statement {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exhibition title: everything before the first `@`
    pub fn title(&self) -> &str {
        self.0.split('@').next().unwrap_or_default().trim()
    }

    /// Statement text after the first `@`; the whole text when there is none
    pub fn body(&self) -> &str {
        match self.0.split_once('@') {
            Some((_, body)) => body.trim(),
            None => self.0.trim(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of one exhibition round
#[derive(Debug, Clone)]
pub struct Exhibit {
    pub statement: Statement,
    /// Stored triptych, `None` when the model returned no image
    pub image: Option<ImageRef>,
    pub captions: [String; WORKS_PER_EXHIBIT],
    /// Text that came with the image, one trimmed part per line
    pub response_text: String,
}

impl Exhibit {
    pub fn title(&self) -> &str {
        self.statement.title()
    }
}
