//! Shared application state.

use crate::config::ServerConfig;
use data_facade::DatasetStore;
use forecast_facade::SequencePredictor;
use narrative::{GeminiProvider, LlmProvider};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub predictor: Option<Arc<dyn SequencePredictor>>,
    pub llm: Option<Arc<dyn LlmProvider>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Empty store, no predictor, no LLM.
    pub fn new() -> Self {
        Self {
            store: Arc::new(DatasetStore::new()),
            predictor: None,
            llm: None,
        }
    }

    pub fn with_predictor(mut self, predictor: Arc<dyn SequencePredictor>) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn with_llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Load the model and LLM client named by the configuration.
    ///
    /// A missing or broken model only disables forecasting; the server
    /// still starts.
    pub fn from_config(config: &ServerConfig) -> Self {
        let mut state = Self::new();

        match &config.model_path {
            Some(path) => match predictor_core::load_model(path) {
                Ok(model) => {
                    info!(
                        path = %path.display(),
                        time_steps = model.time_steps(),
                        features = model.feature_count(),
                        "Model loaded"
                    );
                    state = state.with_predictor(Arc::new(model));
                }
                Err(e) => warn!(path = %path.display(), error = %e, "Model not loaded, forecasting disabled"),
            },
            None => warn!("MODEL_PATH not set, forecasting disabled"),
        }

        match &config.gemini {
            Some(gemini) => match GeminiProvider::new(gemini.clone()) {
                Ok(provider) => {
                    info!(model = %gemini.model, "LLM provider configured");
                    state = state.with_llm(Arc::new(provider));
                }
                Err(e) => warn!(error = %e, "LLM provider not configured"),
            },
            None => warn!("GEMINI_API_KEY not set, reports and chat disabled"),
        }

        state
    }
}
