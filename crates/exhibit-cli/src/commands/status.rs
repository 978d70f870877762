//! Status command handler

use crate::error::CliError;
use crate::local_storage;
use exhibit::ExhibitConfig;
use exhibit::feedback::has_commented;
use exhibit::gallery::Gallery;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ExhibitionStatus {
    pub latest_image: Option<String>,
    pub modified: Option<chrono::DateTime<chrono::Local>>,
    pub audiences: Vec<AudienceStatus>,
}

#[derive(Debug, Serialize)]
pub struct AudienceStatus {
    pub id: u32,
    pub feedback_file: String,
    pub has_commented: bool,
}

/// Latest image and which audience members have reacted to it
pub async fn collect_status(config: &ExhibitConfig) -> Result<ExhibitionStatus, CliError> {
    let storage = local_storage(config);
    let latest = Gallery::new(storage.clone(), config.images_dir.clone())
        .latest()
        .await?;

    let mut audiences = Vec::new();
    for id in 1..=config.curator.audience_count {
        let feedback_file = config.feedback_file(id);
        let log = storage
            .read_optional(&feedback_file)
            .await
            .map_err(exhibit::ExhibitError::from)?;
        let commented = match (&latest, log) {
            (Some(image), Some(log)) => has_commented(&log, &image.name),
            _ => false,
        };
        audiences.push(AudienceStatus {
            id,
            feedback_file,
            has_commented: commented,
        });
    }

    Ok(ExhibitionStatus {
        modified: latest
            .as_ref()
            .and_then(|image| image.modified)
            .map(|t| t.with_timezone(&chrono::Local)),
        latest_image: latest.map(|image| image.path),
        audiences,
    })
}

pub async fn run_status(config: &ExhibitConfig, json: bool) -> Result<(), CliError> {
    let status = collect_status(config).await?;

    if json {
        let rendered = serde_json::to_string_pretty(&status)
            .map_err(|e| CliError::InvalidInput(format!("Failed to render status: {}", e)))?;
        println!("{}", rendered);
        return Ok(());
    }

    match (&status.latest_image, &status.modified) {
        (Some(path), Some(modified)) => {
            println!("🖼️  Latest image: {} ({})", path, modified.format("%Y-%m-%d %H:%M:%S"))
        }
        (Some(path), None) => println!("🖼️  Latest image: {}", path),
        (None, _) => println!("⚠️  No images yet, run 'exhibit curator' first"),
    }
    for audience in &status.audiences {
        let mark = if audience.has_commented { "✅" } else { "⏳" };
        println!("{} Audience {} ({})", mark, audience.id, audience.feedback_file);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use exhibit::feedback::FeedbackEntry;

    #[tokio::test]
    async fn test_status_reports_commented_audiences() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExhibitConfig {
            base_dir: dir.path().to_string_lossy().to_string(),
            ..Default::default()
        };
        let storage = local_storage(&config);

        let empty = collect_status(&config).await.unwrap();
        assert!(empty.latest_image.is_none());
        assert!(empty.audiences.iter().all(|a| !a.has_commented));

        storage
            .write("GeneratedImages/generated_exhibition_20250501_120000.png", b"x")
            .await
            .unwrap();
        let entry = FeedbackEntry::new(
            "generated_exhibition_20250501_120000.png",
            "seen",
            chrono::Local::now().naive_local(),
        );
        storage
            .append("GeneratedTexts/audience_feedback2.txt", entry.render().as_bytes())
            .await
            .unwrap();

        let status = collect_status(&config).await.unwrap();
        assert_eq!(
            status.latest_image.as_deref(),
            Some("GeneratedImages/generated_exhibition_20250501_120000.png")
        );
        let commented: Vec<u32> = status
            .audiences
            .iter()
            .filter(|a| a.has_commented)
            .map(|a| a.id)
            .collect();
        assert_eq!(commented, vec![2]);
    }
}
