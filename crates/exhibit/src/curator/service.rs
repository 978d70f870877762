use chrono::Local;
use exhibit_core::{
    CoreError, GenerateRequest, GenerationConfig, Modality, SharedModel, extract_captions,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{Exhibit, Statement};
use crate::config::{CuratorConfig, ExhibitConfig};
use crate::feedback::{FeedbackReader, render_response, render_statement};
use crate::gallery::Gallery;
use crate::prompts;
use crate::schedule::Schedule;
use crate::triptych::compose_triptych;
use crate::storage::Storage;
use crate::Result;

/// Writes statements, commissions images and logs both
#[derive(Clone)]
pub struct Curator {
    model: SharedModel,
    storage: Arc<dyn Storage>,
    gallery: Gallery,
    feedback: FeedbackReader,
    config: CuratorConfig,
    texts_dir: String,
    statement_file: String,
    response_file: String,
    feedback_files: Vec<String>,
}

impl Curator {
    pub fn new(model: SharedModel, storage: Arc<dyn Storage>, config: &ExhibitConfig) -> Self {
        Self {
            gallery: Gallery::new(storage.clone(), config.images_dir.clone()),
            feedback: FeedbackReader::new(storage.clone()),
            model,
            storage,
            config: config.curator.clone(),
            texts_dir: config.texts_dir.clone(),
            statement_file: config.statement_file(),
            response_file: config.image_response_file(),
            feedback_files: config.feedback_files(),
        }
    }

    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    /// Create the images and texts directories
    pub async fn prepare(&self) -> Result<()> {
        self.gallery.prepare().await?;
        self.storage.create_dir(&self.texts_dir).await?;
        Ok(())
    }

    /// Ask the model for a fresh curatorial statement
    pub async fn generate_statement(&self) -> Result<Statement> {
        let request = GenerateRequest::new(&self.config.statement_model)
            .text(&self.config.prompt)
            .with_config(
                GenerationConfig::default()
                    .with_max_output_tokens(self.config.max_output_tokens)
                    .with_temperature(self.config.temperature),
            );

        let response = self.model.generate(request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(CoreError::EmptyResponse("curatorial statement".to_string()).into());
        }

        let statement = Statement::new(text);
        info!(title = %statement.title(), "🎯 Curatorial statement:\n{}", statement);
        Ok(statement)
    }

    /// Append the statement to the statement log
    pub async fn save_statement(&self, statement: &Statement) -> Result<()> {
        let block = render_statement(statement.as_str(), Local::now().naive_local());
        self.storage
            .append(&self.statement_file, block.as_bytes())
            .await?;
        debug!(file = %self.statement_file, "Statement saved");
        Ok(())
    }

    /// Latest reactions of every audience member, oldest file first
    pub async fn read_all_feedback(&self) -> Result<String> {
        self.feedback
            .recent(&self.feedback_files, self.config.feedback_entries)
            .await
    }

    /// Commission the triptych for a statement and store it
    pub async fn generate_image(&self, statement: &Statement) -> Result<Exhibit> {
        let feedback = self.read_all_feedback().await?;
        let generated_at = Local::now().naive_local();

        let mut request = GenerateRequest::new(&self.config.image_model).with_config(
            GenerationConfig::default().with_modalities([Modality::Text, Modality::Image]),
        );
        for instruction in prompts::IMAGE_INSTRUCTIONS {
            request = request.text(instruction);
        }
        let request = request
            .text(prompts::feedback_section(&feedback))
            .text(statement.as_str());

        let response = self.model.generate(request).await?;
        let response_text = response.joined_text();

        let image = match response.image() {
            Some(blob) => {
                let triptych = compose_triptych(blob)?;
                let image = self.gallery.save(&triptych, generated_at).await?;
                info!(
                    path = %image.path,
                    source_mime = %blob.mime_type,
                    bytes = triptych.data.len(),
                    "🖼️ Exhibition triptych saved"
                );
                Some(image)
            }
            None => {
                warn!("⚠️ No image in the generation response");
                None
            }
        };

        let captions = extract_captions(&response_text);
        if !response_text.is_empty() {
            info!("💬 Attached text:\n{}", response_text);
        }

        Ok(Exhibit {
            statement: statement.clone(),
            image,
            captions,
            response_text: response_text.trim().to_string(),
        })
    }

    /// Append the image's attached text to the response log
    pub async fn save_response_text(&self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let block = render_response(text, Local::now().naive_local());
        self.storage
            .append(&self.response_file, block.as_bytes())
            .await?;
        Ok(())
    }

    /// One full round: statement, image, logs
    pub async fn generate_once(&self) -> Result<Exhibit> {
        let statement = self.generate_statement().await?;
        self.save_statement(&statement).await?;
        let exhibit = self.generate_image(&statement).await?;
        self.save_response_text(&exhibit.response_text).await?;
        Ok(exhibit)
    }

    /// Keep producing exhibitions while the schedule is open
    ///
    /// Returns the number of completed rounds once the schedule closes.
    pub async fn run_exhibition(&self, schedule: &Schedule) -> Result<usize> {
        self.prepare().await?;
        let mut rounds = 0;

        while schedule.is_open() {
            let exhibit = self.generate_once().await?;
            rounds += 1;
            info!(round = rounds, title = %exhibit.title(), "Exhibition round complete");
            tokio::time::sleep(self.config.pause()).await;
        }

        info!(rounds, "Exhibition closed");
        Ok(rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExhibitError;
    use crate::feedback::FeedbackEntry;
    use crate::storage::LocalStorage;
    use exhibit_core::testing::ScriptedModel;
    use crate::triptych::{FRAME, GAP, MARGIN};
    use exhibit_core::{Blob, GenerativeModel, Part};
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn painted(width: u32, height: u32, format: ImageFormat, mime: &str) -> Blob {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 90, 160])));
        let mut data = Vec::new();
        image.write_to(&mut Cursor::new(&mut data), format).unwrap();
        Blob::new(mime, data)
    }

    fn setup(model: ScriptedModel) -> (tempfile::TempDir, Arc<ScriptedModel>, Arc<LocalStorage>, Curator) {
        let dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let model = Arc::new(model);
        let shared: SharedModel = model.clone();
        let curator = Curator::new(shared, storage.clone(), &ExhibitConfig::default());
        (dir, model, storage, curator)
    }

    #[tokio::test]
    async fn test_generate_statement_request_shape() {
        let (_dir, model, _storage, curator) =
            setup(ScriptedModel::new().reply_text("Static Psalms @ For the unseen."));

        let statement = curator.generate_statement().await.unwrap();
        assert_eq!(statement.title(), "Static Psalms");

        let requests = model.requests().await;
        assert_eq!(requests[0].model, "gemini-1.5-flash");
        assert_eq!(requests[0].config.max_output_tokens, Some(210));
        assert_eq!(requests[0].config.temperature, Some(1.2));
        assert_eq!(requests[0].parts[0].as_text(), Some(prompts::CURATOR_PROMPT));
    }

    #[tokio::test]
    async fn test_empty_statement_is_error() {
        let (_dir, _model, _storage, curator) = setup(ScriptedModel::new().reply_text("   "));
        assert!(curator.generate_statement().await.is_err());
    }

    #[tokio::test]
    async fn test_generate_image_includes_feedback_and_statement() {
        let (_dir, model, storage, curator) = setup(ScriptedModel::new().reply(vec![
            Part::Text("work1: Foam\n".to_string()),
            Part::InlineData(painted(300, 300, ImageFormat::Png, "image/png")),
            Part::Text("work2: Drift work3: Hush".to_string()),
        ]));

        let entry = FeedbackEntry::new("old.png", "It felt cold.", Local::now().naive_local());
        storage
            .append("GeneratedTexts/audience_feedback2.txt", entry.render().as_bytes())
            .await
            .unwrap();

        let statement = Statement::new("Foam @ text");
        let exhibit = curator.generate_image(&statement).await.unwrap();

        let request = &model.requests().await[0];
        assert_eq!(request.model, "gemini-2.0-flash-exp-image-generation");
        assert_eq!(
            request.config.response_modalities,
            vec![Modality::Text, Modality::Image]
        );
        assert_eq!(request.parts.len(), 6);
        assert_eq!(
            request.parts[4].as_text(),
            Some("Here are recent audience reflections you can consider:\nIt felt cold.")
        );
        assert_eq!(request.parts[5].as_text(), Some("Foam @ text"));

        let image = exhibit.image.unwrap();
        assert!(image.name.starts_with("generated_exhibition_"));
        assert!(image.name.ends_with(".png"));
        let stored = image::load_from_memory(&storage.read(&image.path).await.unwrap()).unwrap();
        assert_eq!(stored.width(), 2 * MARGIN + 3 * (100 + 2 * FRAME) + 2 * GAP);
        assert_eq!(stored.height(), 2 * MARGIN + 100 + 2 * FRAME);
        assert_eq!(
            exhibit.captions,
            [
                "work1: Foam".to_string(),
                "work2: Drift".to_string(),
                "work3: Hush".to_string()
            ]
        );
        assert_eq!(exhibit.response_text, "work1: Foam\nwork2: Drift work3: Hush");
    }

    #[tokio::test]
    async fn test_generate_image_without_image() {
        let (_dir, _model, storage, curator) =
            setup(ScriptedModel::new().reply_text("I cannot draw today."));

        let exhibit = curator
            .generate_image(&Statement::new("Void @ nothing"))
            .await
            .unwrap();
        assert!(exhibit.image.is_none());
        assert_eq!(exhibit.captions[0], "work1: No caption available.");
        assert!(storage.list("GeneratedImages").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_once_writes_logs() {
        let (_dir, model, storage, curator) = setup(
            ScriptedModel::new()
                .reply_text("Ghost Pets @ Statement body.")
                .reply_text_and_image(
                    "work1: a work2: b work3: c",
                    painted(90, 60, ImageFormat::Jpeg, "image/jpeg"),
                ),
        );

        let exhibit = curator.generate_once().await.unwrap();
        assert_eq!(exhibit.title(), "Ghost Pets");
        assert!(exhibit.image.unwrap().name.ends_with(".png"));
        assert_eq!(model.remaining().await, 0);

        let statements = storage
            .read_to_string("GeneratedTexts/exhibition_statement.txt")
            .await
            .unwrap();
        assert!(statements.contains("🗓️ 策展時間："));
        assert!(statements.contains("Ghost Pets @ Statement body."));

        let responses = storage
            .read_to_string("GeneratedTexts/generated_image_response.txt")
            .await
            .unwrap();
        assert!(responses.contains("work1: a work2: b work3: c"));
    }

    #[tokio::test]
    async fn test_undecodable_image_is_error() {
        let (_dir, _model, storage, curator) = setup(
            ScriptedModel::new().reply_text_and_image("work1: a", Blob::new("image/png", vec![1, 2, 3])),
        );

        let result = curator.generate_image(&Statement::new("Noise @ static")).await;
        assert!(matches!(result, Err(ExhibitError::Image(_))));
        assert!(storage.list("GeneratedImages").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_response_text_not_logged() {
        let (_dir, _model, storage, curator) = setup(ScriptedModel::new());
        curator.save_response_text("  \n").await.unwrap();
        assert!(
            !storage
                .exists("GeneratedTexts/generated_image_response.txt")
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_model_failure_propagates() {
        let (_dir, model, _storage, curator) = setup(ScriptedModel::new().fail("quota"));
        assert!(curator.generate_once().await.is_err());
        assert_eq!(model.metadata().name.as_deref(), Some("ScriptedModel"));
    }
}
