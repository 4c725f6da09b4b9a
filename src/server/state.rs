use std::sync::Arc;

use crate::assistant::{AssistantService, GeminiClient, TextGenerator};
use crate::config::Config;
use crate::Result;

/// Shared application state for the HTTP server
pub struct AppState<G> {
    inner: Arc<AppStateInner<G>>,
}

struct AppStateInner<G> {
    config: Config,
    assistant: AssistantService<G>,
}

// Derive would demand `G: Clone`.
impl<G> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl AppState<GeminiClient> {
    pub fn from_config(config: Config) -> Result<Self> {
        let client = GeminiClient::new(&config.assistant)?;
        Ok(Self::new(config, client))
    }
}

impl<G: TextGenerator> AppState<G> {
    pub fn new(config: Config, generator: G) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                assistant: AssistantService::new(generator),
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn assistant(&self) -> &AssistantService<G> {
        &self.inner.assistant
    }
}
