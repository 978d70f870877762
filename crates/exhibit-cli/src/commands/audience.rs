//! Audience command handler

use crate::error::CliError;
use exhibit::{CommentOutcome, Exhibition};
use tracing::info;

pub async fn run_audience(
    exhibition: &Exhibition,
    id: u32,
    once: bool,
    prompt: Option<String>,
) -> Result<(), CliError> {
    if id == 0 {
        return Err(CliError::InvalidInput(
            "Audience id starts at 1".to_string(),
        ));
    }

    let mut audience = exhibition.audience(id);
    if let Some(prompt) = prompt {
        audience = audience.with_prompt(prompt);
    }

    if once {
        match audience.comment_once().await? {
            CommentOutcome::Recorded { image, text } => {
                println!("🎤 Audience {} on {}:\n{}", id, image.name, text);
            }
            CommentOutcome::Skipped { image } => {
                println!("⚠️  Audience {} already commented on {}", id, image.name);
            }
        }
        return Ok(());
    }

    let monitor = exhibition.monitor(format!("Audience{}", id));
    tokio::select! {
        _ = monitor.supervise(|| audience.run()) => {}
        _ = tokio::signal::ctrl_c() => {
            info!(audience = id, "Ctrl-C received, leaving the exhibition");
            println!("\n👋 Audience {} left", id);
        }
    }

    Ok(())
}
