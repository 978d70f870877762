use chrono::Local;
use exhibit_core::{GenerateRequest, SharedModel};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::CommentOutcome;
use crate::config::ExhibitConfig;
use crate::feedback::{FeedbackEntry, has_commented};
use crate::gallery::{Gallery, ImageRef};
use crate::storage::Storage;
use crate::{ExhibitError, Result};

/// One simulated visitor reacting to the newest image
#[derive(Clone)]
pub struct Audience {
    id: u32,
    model: SharedModel,
    storage: Arc<dyn Storage>,
    gallery: Gallery,
    model_name: String,
    prompt: String,
    feedback_file: String,
    poll_interval: Duration,
}

impl Audience {
    pub fn new(id: u32, model: SharedModel, storage: Arc<dyn Storage>, config: &ExhibitConfig) -> Self {
        Self {
            id,
            gallery: Gallery::new(storage.clone(), config.images_dir.clone()),
            model,
            storage,
            model_name: config.audience.model.clone(),
            prompt: config.audience.prompt.clone(),
            feedback_file: config.feedback_file(id),
            poll_interval: config.audience.poll_interval(),
        }
    }

    /// Replace the question put to the model
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn feedback_file(&self) -> &str {
        &self.feedback_file
    }

    /// Most recently modified image in the gallery
    pub async fn latest_image(&self) -> Result<ImageRef> {
        self.gallery.prepare().await?;
        self.gallery
            .latest()
            .await?
            .ok_or_else(|| ExhibitError::NoImages(self.gallery.images_dir().to_string()))
    }

    /// Whether this audience member's log already names the image
    pub async fn has_commented(&self, image_name: &str) -> Result<bool> {
        Ok(self
            .storage
            .read_optional(&self.feedback_file)
            .await?
            .is_some_and(|log| has_commented(&log, image_name)))
    }

    /// Append a reaction to the feedback log
    pub async fn save_response(&self, image: &ImageRef, text: &str) -> Result<()> {
        let entry = FeedbackEntry::new(&image.name, text, Local::now().naive_local());
        self.storage
            .append(&self.feedback_file, entry.render().as_bytes())
            .await?;
        info!(audience = self.id, file = %self.feedback_file, "✅ Feedback saved");
        Ok(())
    }

    /// Look at the latest image once and react if it is new to us
    pub async fn comment_once(&self) -> Result<CommentOutcome> {
        let image = self.latest_image().await?;

        if self.has_commented(&image.name).await? {
            info!(audience = self.id, image = %image.name, "⚠️ Already commented, skipping this round");
            return Ok(CommentOutcome::Skipped { image });
        }

        let blob = self.gallery.read(&image).await?;
        let request = GenerateRequest::new(&self.model_name)
            .image(blob)
            .text(&self.prompt);

        let response = self.model.generate(request).await?;
        let text = response.text().trim().to_string();
        info!(audience = self.id, image = %image.name, "🎤 AI audience response:\n{}", text);

        self.save_response(&image, &text).await?;
        Ok(CommentOutcome::Recorded { image, text })
    }

    /// View and react forever, pausing between rounds
    pub async fn run(&self) -> Result<()> {
        loop {
            info!(audience = self.id, "👁️ Viewing the latest work...");
            self.comment_once().await?;
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
