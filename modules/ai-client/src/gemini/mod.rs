mod client;
pub(crate) mod types;

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::error::{AiError, Result};
use crate::traits::TextModel;

use client::GeminiClient;
use types::GenerateContentRequest;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// =============================================================================
// Gemini
// =============================================================================

/// Google Gemini text generation. Holds one pooled HTTP client for its lifetime.
pub struct Gemini {
    model: String,
    client: GeminiClient,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::builder(api_key, model).build()
    }

    pub fn builder(api_key: impl Into<String>, model: impl Into<String>) -> GeminiBuilder {
        GeminiBuilder {
            api_key: api_key.into(),
            model: model.into(),
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one prompt and return the reply text unmodified.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::user(prompt).temperature(0.0);
        let response = self.client.generate_content(&self.model, &request).await?;

        response.text().ok_or_else(|| {
            let reason = response.empty_reason();
            warn!(model = %self.model, reason = %reason, "Gemini returned no text");
            AiError::EmptyResponse(reason)
        })
    }
}

pub struct GeminiBuilder {
    api_key: String,
    model: String,
    base_url: Option<String>,
    timeout: Duration,
}

impl GeminiBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<Gemini> {
        if self.api_key.trim().is_empty() {
            return Err(AiError::Config("Gemini API key is empty".to_string()));
        }
        let client = GeminiClient::new(&self.api_key, self.timeout)?;
        let client = match self.base_url {
            Some(ref url) => client.with_base_url(url),
            None => client,
        };
        Ok(Gemini {
            model: self.model,
            client,
        })
    }
}

#[async_trait]
impl TextModel for Gemini {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        self.generate(prompt).await
    }
}
