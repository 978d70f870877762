//! Feedback command handler

use crate::error::CliError;
use crate::local_storage;
use exhibit::ExhibitConfig;
use exhibit::feedback::FeedbackReader;

/// Print the audience reflections the curator would send next
pub async fn run_feedback(config: &ExhibitConfig, entries: Option<usize>) -> Result<(), CliError> {
    let reader = FeedbackReader::new(local_storage(config));
    let entries = entries.unwrap_or(config.curator.feedback_entries);
    let feedback = reader.recent(&config.feedback_files(), entries).await?;

    if feedback.is_empty() {
        println!("💤 No audience feedback yet");
    } else {
        println!("{}", feedback);
    }
    Ok(())
}
