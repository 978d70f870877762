//! Plain-text log formats shared by curator and audience
//!
//! Every log is a sequence of appended blocks: a blank line, a 60-character
//! rule, emoji headers, a blank line, the free text, and a closing rule.
//! Audience logs are read back by the curator to steer the next image.

use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::debug;

use crate::Result;
use crate::storage::Storage;

pub const RULE_WIDTH: usize = 60;
pub const IMAGE_HEADER: &str = "🖼️ 圖片：";
pub const TIME_HEADER: &str = "🕒 時間：";
pub const STATEMENT_HEADER: &str = "🗓️ 策展時間：";
pub const RESPONSE_HEADER: &str = "🕒 生成時間：";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

fn render_block(rule_char: char, headers: &[String], text: &str) -> String {
    let rule = rule(rule_char);
    let mut block = format!("\n{}\n", rule);
    for header in headers {
        block.push_str(header);
        block.push('\n');
    }
    block.push('\n');
    block.push_str(text.trim());
    block.push('\n');
    block.push_str(&rule);
    block.push('\n');
    block
}

/// One audience reaction to one image
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackEntry {
    pub image_name: String,
    pub timestamp: NaiveDateTime,
    pub text: String,
}

impl FeedbackEntry {
    pub fn new(image_name: impl Into<String>, text: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            image_name: image_name.into(),
            timestamp,
            text: text.into(),
        }
    }

    pub fn render(&self) -> String {
        render_block(
            '-',
            &[
                format!("{}{}", IMAGE_HEADER, self.image_name),
                format!("{}{}", TIME_HEADER, self.timestamp.format(TIMESTAMP_FORMAT)),
            ],
            &self.text,
        )
    }
}

/// Block appended to the statement log
pub fn render_statement(statement: &str, timestamp: NaiveDateTime) -> String {
    render_block(
        '=',
        &[format!("{}{}", STATEMENT_HEADER, timestamp.format(TIMESTAMP_FORMAT))],
        statement,
    )
}

/// Block appended to the image response log
pub fn render_response(text: &str, timestamp: NaiveDateTime) -> String {
    render_block(
        '-',
        &[format!("{}{}", RESPONSE_HEADER, timestamp.format(TIMESTAMP_FORMAT))],
        text,
    )
}

/// Reaction bodies of an audience log, oldest first
///
/// A dashed rule only closes a block that is open, so the rule opening
/// the next entry never repeats the previous body.
pub fn parse_feedback_blocks(log: &str) -> Vec<String> {
    let closing_rule = rule('-');
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for line in log.split_inclusive('\n') {
        if line.starts_with(TIME_HEADER) {
            current = Some(String::new());
        } else if line.starts_with(&closing_rule) {
            if let Some(block) = current.take() {
                let block = block.trim();
                if !block.is_empty() {
                    blocks.push(block.to_string());
                }
            }
        } else if let Some(block) = current.as_mut() {
            block.push_str(line);
        }
    }

    blocks
}

/// Whether an audience log already mentions an image
pub fn has_commented(log: &str, image_name: &str) -> bool {
    log.contains(image_name)
}

/// Collects recent audience reactions for the curator
#[derive(Clone)]
pub struct FeedbackReader {
    storage: Arc<dyn Storage>,
}

impl FeedbackReader {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Last `max_entries` reactions of each file, in file order
    ///
    /// Missing files are skipped.
    pub async fn recent(&self, files: &[String], max_entries: usize) -> Result<String> {
        let mut collected = Vec::new();

        for file in files {
            let Some(log) = self.storage.read_optional(file).await? else {
                debug!(file = %file, "No feedback yet");
                continue;
            };
            let blocks = parse_feedback_blocks(&log);
            let skip = blocks.len().saturating_sub(max_entries);
            collected.extend(blocks.into_iter().skip(skip));
        }

        Ok(collected.join("\n").trim().to_string())
    }
}
