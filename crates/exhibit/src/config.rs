use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::prompts;
use crate::schedule::Schedule;

/// Exhibition configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhibitConfig {
    /// Base directory for all storage
    pub base_dir: String,

    /// Generated images directory (relative to base_dir)
    pub images_dir: String,

    /// Statement, response and feedback logs directory (relative to base_dir)
    pub texts_dir: String,

    /// Log level
    pub log_level: String,

    /// Hosted model access
    pub api: ApiConfig,

    /// Curator settings
    pub curator: CuratorConfig,

    /// Audience settings
    pub audience: AudienceConfig,

    /// Restart-on-crash settings
    pub monitor: MonitorConfig,
}

impl Default for ExhibitConfig {
    fn default() -> Self {
        Self {
            base_dir: ".".to_string(),
            images_dir: "GeneratedImages".to_string(),
            texts_dir: "GeneratedTexts".to_string(),
            log_level: "info".to_string(),
            api: ApiConfig::default(),
            curator: CuratorConfig::default(),
            audience: AudienceConfig::default(),
            monitor: MonitorConfig::default(),
        }
    }
}

impl ExhibitConfig {
    /// Load from a JSON or TOML configuration file (chosen by extension)
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e)),
            _ => serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e)),
        }
    }

    /// Load `.env` from the working directory, if any
    pub fn load_dotenv() {
        dotenv::dotenv().ok();
    }

    /// Feedback file of one audience member, relative to base_dir
    pub fn feedback_file(&self, audience_id: u32) -> String {
        format!("{}/audience_feedback{}.txt", self.texts_dir, audience_id)
    }

    pub fn statement_file(&self) -> String {
        format!("{}/exhibition_statement.txt", self.texts_dir)
    }

    pub fn image_response_file(&self) -> String {
        format!("{}/generated_image_response.txt", self.texts_dir)
    }

    /// Feedback files of every audience member the curator listens to
    pub fn feedback_files(&self) -> Vec<String> {
        (1..=self.curator.audience_count)
            .map(|id| self.feedback_file(id))
            .collect()
    }
}

/// Hosted model access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API key; falls back to GEMINI_API_KEY / GOOGLE_API_KEY when unset
    pub api_key: Option<String>,

    /// Override of the API host
    pub base_url: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout_secs: 120,
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Curator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CuratorConfig {
    /// Model writing the curatorial statement
    pub statement_model: String,

    /// Model producing the triptych image and captions
    pub image_model: String,

    /// Token cap for the statement
    pub max_output_tokens: u32,

    /// Sampling temperature for the statement
    pub temperature: f32,

    /// Curatorial prompt
    pub prompt: String,

    /// Number of audience feedback files to read
    pub audience_count: u32,

    /// Most recent feedback blocks taken from each file
    pub feedback_entries: usize,

    /// Pause between exhibition rounds, in seconds
    pub pause_secs: u64,

    /// Daily opening hours; `None` runs around the clock
    pub schedule: Option<ScheduleConfig>,
}

impl Default for CuratorConfig {
    fn default() -> Self {
        Self {
            statement_model: "gemini-1.5-flash".to_string(),
            image_model: "gemini-2.0-flash-exp-image-generation".to_string(),
            max_output_tokens: 210,
            temperature: 1.2,
            prompt: prompts::CURATOR_PROMPT.to_string(),
            audience_count: 3,
            feedback_entries: 3,
            pause_secs: 1,
            schedule: Some(ScheduleConfig::default()),
        }
    }
}

impl CuratorConfig {
    pub fn pause(&self) -> Duration {
        Duration::from_secs(self.pause_secs)
    }
}

/// Daily opening hours as `HH:MM` or `HH:MM:SS`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub start: String,
    pub end: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start: "12:35".to_string(),
            end: "23:36".to_string(),
        }
    }
}

impl ScheduleConfig {
    pub fn to_schedule(&self) -> crate::Result<Schedule> {
        Schedule::window(&self.start, &self.end)
    }
}

/// Audience configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudienceConfig {
    /// Model reacting to the images
    pub model: String,

    /// Question put to the model alongside the image
    pub prompt: String,

    /// Delay between viewing rounds, in seconds
    pub poll_interval_secs: u64,
}

impl Default for AudienceConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            prompt: prompts::AUDIENCE_PROMPT.to_string(),
            poll_interval_secs: 5,
        }
    }
}

impl AudienceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

/// Restart-on-crash configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Sleep after a crash before restarting, in seconds
    pub restart_delay_secs: u64,

    /// Sleep between schedule checks while closed, in seconds
    pub idle_poll_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            restart_delay_secs: 5,
            idle_poll_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_file_layout() {
        let config = ExhibitConfig::default();
        assert_eq!(config.statement_file(), "GeneratedTexts/exhibition_statement.txt");
        assert_eq!(
            config.image_response_file(),
            "GeneratedTexts/generated_image_response.txt"
        );
        assert_eq!(
            config.feedback_files(),
            vec![
                "GeneratedTexts/audience_feedback1.txt",
                "GeneratedTexts/audience_feedback2.txt",
                "GeneratedTexts/audience_feedback3.txt",
            ]
        );
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"images_dir": "imgs", "curator": {{"audience_count": 2, "schedule": null}}}}"#
        )
        .unwrap();

        let config = ExhibitConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.images_dir, "imgs");
        assert_eq!(config.texts_dir, "GeneratedTexts");
        assert_eq!(config.curator.audience_count, 2);
        assert!(config.curator.schedule.is_none());
        assert_eq!(config.curator.max_output_tokens, 210);
    }

    #[test]
    fn test_load_toml() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(
            file,
            "texts_dir = \"logs\"\n\n[audience]\npoll_interval_secs = 9\n\n[curator.schedule]\nstart = \"08:30\"\nend = \"17:30\"\n"
        )
        .unwrap();

        let config = ExhibitConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.texts_dir, "logs");
        assert_eq!(config.audience.poll_interval(), Duration::from_secs(9));
        let schedule = config.curator.schedule.unwrap();
        assert_eq!(schedule.start, "08:30");
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(ExhibitConfig::load_from_file(Path::new("/nonexistent/exhibit.json")).is_err());
    }
}
