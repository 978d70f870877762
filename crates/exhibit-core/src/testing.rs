//! Scripted model for tests and offline runs

use crate::{
    Blob, CoreError, GenerateRequest, GenerateResponse, GenerativeModel, ModelMetadata, Part,
    Result,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// A canned reply queued on a [`ScriptedModel`]
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    Parts(Vec<Part>),
    Error(String),
}

/// Replays queued replies in order and records every request
#[derive(Debug, Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a text-only reply
    pub fn reply_text(self, text: impl Into<String>) -> Self {
        self.reply(vec![Part::Text(text.into())])
    }

    /// Queue a reply carrying text and an image
    pub fn reply_text_and_image(self, text: impl Into<String>, image: Blob) -> Self {
        self.reply(vec![Part::Text(text.into()), Part::InlineData(image)])
    }

    /// Queue an arbitrary reply
    pub fn reply(mut self, parts: Vec<Part>) -> Self {
        self.replies.get_mut().push_back(ScriptedReply::Parts(parts));
        self
    }

    /// Queue a backend failure
    pub fn fail(mut self, message: impl Into<String>) -> Self {
        self.replies
            .get_mut()
            .push_back(ScriptedReply::Error(message.into()));
        self
    }

    /// Requests received so far
    pub async fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().await.clone()
    }

    /// Replies not yet consumed
    pub async fn remaining(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let request_id = request.id.clone();
        self.requests.lock().await.push(request);

        match self.replies.lock().await.pop_front() {
            Some(ScriptedReply::Parts(parts)) => Ok(GenerateResponse {
                request_id,
                parts,
                metadata: None,
            }),
            Some(ScriptedReply::Error(message)) => Err(CoreError::Backend(message)),
            None => Err(CoreError::Backend("no scripted reply left".to_string())),
        }
    }

    fn metadata(&self) -> ModelMetadata {
        ModelMetadata {
            name: Some("ScriptedModel".to_string()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let model = ScriptedModel::new().reply_text("first").fail("boom");

        let first = model.generate(GenerateRequest::new("m").text("a")).await;
        assert_eq!(first.unwrap().text(), "first");

        let second = model.generate(GenerateRequest::new("m").text("b")).await;
        assert!(matches!(second, Err(CoreError::Backend(msg)) if msg == "boom"));

        let third = model.generate(GenerateRequest::new("m")).await;
        assert!(third.is_err());

        assert_eq!(model.requests().await.len(), 3);
        assert_eq!(model.remaining().await, 0);
    }
}
