//! Exhibit CLI library

pub mod commands;
pub mod error;

use error::CliError;
use exhibit::ExhibitConfig;
use exhibit::storage::{LocalStorage, Storage};
use std::path::Path;
use std::sync::Arc;

/// Resolve configuration: file (if any), then command-line overrides
///
/// Runs before the subscriber is installed, so it reports through its
/// result only.
pub fn load_config(
    config_file: Option<&Path>,
    base_dir: Option<String>,
    log_level: Option<String>,
) -> Result<ExhibitConfig, CliError> {
    ExhibitConfig::load_dotenv();

    let mut config = match config_file {
        Some(path) => ExhibitConfig::load_from_file(path)
            .map_err(|e| CliError::Config(e.to_string()))?,
        None => ExhibitConfig::default(),
    };

    if let Some(base_dir) = base_dir {
        config.base_dir = base_dir;
    }
    if let Some(log_level) = log_level {
        config.log_level = log_level;
    }

    Ok(config)
}

/// Storage rooted at the configured base directory
pub fn local_storage(config: &ExhibitConfig) -> Arc<dyn Storage> {
    Arc::new(LocalStorage::from_config(config))
}
