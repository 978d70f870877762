//! Application layer
//!
//! Wires one shared model and one storage root into the curator, the
//! audience members and their monitors.

use exhibit_core::{GenerativeModel, SharedModel};
use std::sync::Arc;

use crate::audience::Audience;
use crate::config::ExhibitConfig;
use crate::curator::Curator;
use crate::feedback::FeedbackReader;
use crate::gallery::Gallery;
use crate::monitor::Monitor;
use crate::schedule::Schedule;
use crate::storage::{LocalStorage, Storage};
use crate::{ExhibitError, Result};

/// A configured exhibition
pub struct Exhibition {
    config: ExhibitConfig,
    model: SharedModel,
    storage: Arc<dyn Storage>,
}

impl Exhibition {
    /// Create a new builder
    pub fn builder(config: ExhibitConfig) -> ExhibitionBuilder {
        ExhibitionBuilder::new(config)
    }

    pub fn config(&self) -> &ExhibitConfig {
        &self.config
    }

    pub fn storage(&self) -> Arc<dyn Storage> {
        self.storage.clone()
    }

    pub fn curator(&self) -> Curator {
        Curator::new(self.model.clone(), self.storage.clone(), &self.config)
    }

    pub fn audience(&self, id: u32) -> Audience {
        Audience::new(id, self.model.clone(), self.storage.clone(), &self.config)
    }

    pub fn gallery(&self) -> Gallery {
        Gallery::new(self.storage.clone(), self.config.images_dir.clone())
    }

    pub fn feedback(&self) -> FeedbackReader {
        FeedbackReader::new(self.storage.clone())
    }

    pub fn monitor(&self, name: impl Into<String>) -> Monitor {
        Monitor::from_config(name, &self.config.monitor)
    }

    /// Curator opening hours from configuration
    pub fn schedule(&self) -> Result<Schedule> {
        match &self.config.curator.schedule {
            Some(window) => window.to_schedule(),
            None => Ok(Schedule::Always),
        }
    }
}

/// Builder for [`Exhibition`]
pub struct ExhibitionBuilder {
    config: ExhibitConfig,
    model: Option<SharedModel>,
    storage: Option<Arc<dyn Storage>>,
}

impl ExhibitionBuilder {
    pub fn new(config: ExhibitConfig) -> Self {
        Self {
            config,
            model: None,
            storage: None,
        }
    }

    /// Set the model backend
    pub fn model(mut self, model: impl GenerativeModel + 'static) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    /// Set an already shared model backend
    pub fn shared_model(mut self, model: SharedModel) -> Self {
        self.model = Some(model);
        self
    }

    /// Set the storage; defaults to the local filesystem at `base_dir`
    pub fn storage(mut self, storage: impl Storage + 'static) -> Self {
        self.storage = Some(Arc::new(storage));
        self
    }

    /// Build a Gemini-backed model from the `api` section and the environment
    #[cfg(feature = "gemini")]
    pub fn gemini(self) -> Result<Self> {
        use exhibit_gemini::GeminiClient;

        let api = &self.config.api;
        let client = match &api.api_key {
            Some(key) => GeminiClient::new(key.clone())?,
            None => GeminiClient::from_env()?,
        };
        let client = match &api.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        }
        .with_timeout(api.timeout());

        Ok(self.model(client))
    }

    /// Build the exhibition
    pub fn build(self) -> Result<Exhibition> {
        let model = self
            .model
            .ok_or_else(|| ExhibitError::Build("No model configured".to_string()))?;
        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(LocalStorage::from_config(&self.config)));

        Ok(Exhibition {
            config: self.config,
            model,
            storage,
        })
    }
}
