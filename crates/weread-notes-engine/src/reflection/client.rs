use std::time::Duration;

use reqwest::Client;

use super::wire::{ChatRequest, ChatResponse};
use super::{ReflectionConfig, ReflectionError, ReflectionRequest, Result};

/// HTTP client for a chat-completions endpoint.
pub struct ReflectionClient {
    http: Client,
    config: ReflectionConfig,
}

impl ReflectionClient {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(config: ReflectionConfig) -> Result<Self> {
        Self::with_timeout(config, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(config: ReflectionConfig, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ReflectionConfig {
        &self.config
    }

    /// Sends one request and returns the content of the first choice.
    pub async fn reflect(&self, request: &ReflectionRequest<'_>) -> Result<String> {
        if !self.config.is_complete() {
            return Err(ReflectionError::NotConfigured);
        }

        let prompt = request.prompt(&self.config.prompt_template);
        let body = ChatRequest::user(&self.config.model_name, &prompt);
        log::debug!(
            "requesting reflection from {} with model {}",
            self.config.endpoint_url,
            self.config.model_name
        );

        let response = self
            .http
            .post(&self.config.endpoint_url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            log::warn!("reflection request failed with status {status}");
            return Err(ReflectionError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| ReflectionError::MalformedResponse(e.to_string()))?;
        parsed
            .into_content()
            .ok_or_else(|| ReflectionError::MalformedResponse("响应中没有 choices".to_string()))
    }
}
