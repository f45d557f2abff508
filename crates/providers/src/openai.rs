//! Open-ended answers from an OpenAI-compatible chat endpoint

use async_trait::async_trait;
use jarvis::{config::OpenAiConfig, CapabilityError, CapabilityResult, GenericResponder};
use reqwest::Client;
use serde_json::Value;

const SYSTEM_PROMPT: &str = "You are Jarvis, a helpful personal assistant. \
Answer in one to three short sentences that sound natural when read aloud.";

const MAX_TOKENS: u32 = 200;

pub struct OpenAiResponder {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiResponder {
    pub fn new(config: OpenAiConfig) -> Self {
        if config.api_key.is_some() {
            tracing::info!("OpenAI responder initialized with model {}", config.model);
        } else {
            tracing::warn!("OpenAI responder created without API key - open questions will fail");
        }

        Self {
            client: Client::new(),
            config,
        }
    }

    fn payload(&self, text: &str) -> Value {
        serde_json::json!({
            "model": self.config.model,
            "max_tokens": MAX_TOKENS,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": text }
            ]
        })
    }
}

/// Text of the first choice in a chat completion
pub fn parse_answer(json: &Value) -> Option<String> {
    json["choices"][0]["message"]["content"]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl GenericResponder for OpenAiResponder {
    async fn answer(&self, text: &str) -> CapabilityResult<String> {
        let auth_header = self
            .config
            .api_key
            .as_ref()
            .map(|k| format!("Bearer {}", k))
            .ok_or_else(|| CapabilityError::NotConfigured("The OpenAI API key".into()))?;

        tracing::debug!("[OpenAI] Sending request: model={}", self.config.model);

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", auth_header)
            .json(&self.payload(text))
            .send()
            .await
            .map_err(|e| CapabilityError::unreachable("OpenAI", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("[OpenAI] API error {}: {}", status, body);
            return Err(CapabilityError::failed(format!("OpenAI returned {}", status)));
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| CapabilityError::failed(format!("Invalid OpenAI response: {}", e)))?;

        parse_answer(&json).ok_or_else(|| CapabilityError::failed("OpenAI returned an empty answer"))
    }
}
