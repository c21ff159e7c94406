//! Application state and service initialization
//!
//! This module centralizes service construction and dependency injection so the
//! same wiring is used by the server and by handler tests.

use std::sync::Arc;

use crate::model::Config;
use crate::service::{CompletionProvider, DiagnosisService, LlmClient, RelayService};

/// Application state containing all services
pub struct AppState {
    /// Chat and vision relay
    pub relay_service: Arc<RelayService>,
    /// Image diagnosis (relay + finding extraction)
    pub diagnosis_service: Arc<DiagnosisService>,
}

impl AppState {
    /// Build application state from configuration
    ///
    /// A missing provider credential does not prevent startup: relay calls then
    /// fail individually with a configuration error.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let provider: Option<Arc<dyn CompletionProvider>> = match config.llm.api_key.as_deref() {
            Some(api_key) => {
                let client = LlmClient::new(api_key, &config.llm)
                    .map_err(|e| AppError::InvalidConfig(e.to_string()))?;
                Some(Arc::new(client) as Arc<dyn CompletionProvider>)
            }
            None => {
                tracing::warn!("OPENAI_API_KEY not set, relay endpoints will return errors");
                None
            }
        };

        Ok(Self::with_provider(provider, config))
    }

    /// Build application state around an existing provider
    pub fn with_provider(provider: Option<Arc<dyn CompletionProvider>>, config: &Config) -> Self {
        let relay_service = Arc::new(RelayService::new(provider, config.llm.clone()));
        let diagnosis_service = Arc::new(DiagnosisService::new(Arc::clone(&relay_service)));

        Self {
            relay_service,
            diagnosis_service,
        }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
