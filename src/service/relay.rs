//! Chat/vision relay
//!
//! Packages a user prompt, optional image and prior turns behind a fixed system
//! prompt, makes one provider call and returns the text unmodified. No retries,
//! no caching.

use std::sync::Arc;
use std::time::Instant;

use url::Url;

use crate::model::{AnalysisType, ChatTurn, LlmConfig};
use crate::service::llm::{CompletionMessage, CompletionProvider, CompletionRequest, LlmError};
use crate::service::prompts::{
    CHAT_SYSTEM_PROMPT, DIAGNOSIS_SYSTEM_PROMPT, VISION_SYSTEM_PROMPT, build_diagnosis_prompt,
    build_vision_prompt,
};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RelayError {
    #[error("Provider credentials are not configured")]
    MissingCredentials,

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Provider call failed: {0}")]
    Provider(#[from] LlmError),
}

pub struct RelayService {
    provider: Option<Arc<dyn CompletionProvider>>,
    settings: LlmConfig,
}

impl RelayService {
    /// `provider` is `None` when no credential was available at startup
    pub fn new(provider: Option<Arc<dyn CompletionProvider>>, settings: LlmConfig) -> Self {
        tracing::info!(
            chat_model = %settings.chat_model,
            vision_model = %settings.vision_model,
            provider_configured = provider.is_some(),
            "Relay service initialized"
        );
        Self { provider, settings }
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Text chat with prior turns
    pub async fn chat(&self, message: &str, history: &[ChatTurn]) -> Result<String, RelayError> {
        let message = require_message(message)?;

        let mut messages = vec![CompletionMessage::system(CHAT_SYSTEM_PROMPT)];
        messages.extend(
            trim_history(history, self.settings.max_history_turns)
                .into_iter()
                .filter_map(|turn| {
                    let role = turn.role.as_str()?;
                    Some(CompletionMessage::text(role, turn.content.clone()))
                }),
        );
        messages.push(CompletionMessage::text("user", message));

        let model = self.settings.chat_model.clone();
        self.send("chat", model, messages).await
    }

    /// Chat turn that may carry one image
    pub async fn vision_chat(
        &self,
        message: &str,
        image: Option<&str>,
        context: Option<&str>,
    ) -> Result<String, RelayError> {
        let message = require_message(message)?;
        let prompt = build_vision_prompt(message, context);

        let (model, user) = match image.filter(|i| !i.trim().is_empty()) {
            Some(image) => (
                self.settings.vision_model.clone(),
                CompletionMessage::user_with_image(prompt, normalize_image_reference(image)?),
            ),
            None => (
                self.settings.chat_model.clone(),
                CompletionMessage::text("user", prompt),
            ),
        };

        let messages = vec![CompletionMessage::system(VISION_SYSTEM_PROMPT), user];
        self.send("vision_chat", model, messages).await
    }

    /// Diagnostic narrative for one image
    pub async fn analyze_image(
        &self,
        image: &str,
        analysis_type: AnalysisType,
    ) -> Result<String, RelayError> {
        let image = normalize_image_reference(image)?;
        let messages = vec![
            CompletionMessage::system(DIAGNOSIS_SYSTEM_PROMPT),
            CompletionMessage::user_with_image(build_diagnosis_prompt(analysis_type), image),
        ];

        let model = self.settings.vision_model.clone();
        self.send("diagnosis", model, messages).await
    }

    async fn send(
        &self,
        operation: &'static str,
        model: String,
        messages: Vec<CompletionMessage>,
    ) -> Result<String, RelayError> {
        let provider = self.provider.as_ref().ok_or_else(|| {
            tracing::error!(operation, "Relay call rejected: provider credentials missing");
            RelayError::MissingCredentials
        })?;

        let request = CompletionRequest {
            model,
            messages,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
        };

        let has_image = request.messages.iter().any(CompletionMessage::has_image);
        tracing::debug!(
            operation,
            model = %request.model,
            message_count = request.messages.len(),
            has_image,
            "Relaying request to provider"
        );

        let start_time = Instant::now();
        match provider.complete(&request).await {
            Ok(text) => {
                tracing::info!(
                    operation,
                    model = %request.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    has_image,
                    response_length = text.len(),
                    "Provider call completed"
                );
                Ok(text)
            }
            Err(e) => {
                tracing::error!(
                    operation,
                    model = %request.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    error = %e,
                    "Provider call failed"
                );
                Err(e.into())
            }
        }
    }
}

/// Blank messages are rejected; anything else is forwarded as written
fn require_message(message: &str) -> Result<&str, RelayError> {
    if message.trim().is_empty() {
        return Err(RelayError::InvalidRequest("Message is required".to_string()));
    }
    Ok(message)
}

/// Most recent `max_turns` turns, skipping empty ones and unknown roles
fn trim_history(history: &[ChatTurn], max_turns: usize) -> Vec<&ChatTurn> {
    let turns: Vec<&ChatTurn> = history
        .iter()
        .filter(|turn| turn.role.as_str().is_some())
        .filter(|turn| !turn.content.trim().is_empty())
        .collect();
    let skip = turns.len().saturating_sub(max_turns);
    turns.into_iter().skip(skip).collect()
}

/// Accept a data URI, an http(s) URL, or bare base64 (assumed JPEG)
pub fn normalize_image_reference(image: &str) -> Result<String, RelayError> {
    let image = image.trim();

    if image.is_empty() {
        return Err(RelayError::InvalidRequest("Image is empty".to_string()));
    }

    if image.starts_with("data:image/") {
        return Ok(image.to_string());
    }

    if let Ok(url) = Url::parse(image) {
        return match url.scheme() {
            "http" | "https" => Ok(url.to_string()),
            scheme => Err(RelayError::InvalidRequest(format!(
                "Unsupported image URL scheme: {scheme}"
            ))),
        };
    }

    let is_base64 = image
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '=' | '\n' | '\r'));
    if is_base64 {
        return Ok(format!("data:image/jpeg;base64,{image}"));
    }

    Err(RelayError::InvalidRequest(
        "Image must be a data URI, an http(s) URL or base64 data".to_string(),
    ))
}
