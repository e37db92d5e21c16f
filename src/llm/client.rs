use anyhow::{Context, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::models::ChatMessage;

/// Default hosted chat-completions endpoint
pub const DEFAULT_API_URL: &str = "https://api.together.xyz/v1/chat/completions";
/// Default extraction model
pub const DEFAULT_MODEL: &str = "Qwen/Qwen3-Next-80B-A3B-Thinking";

/// Configuration for the hosted inference client
#[derive(Debug, Clone)]
pub struct InferenceConfig {
    /// Bearer token (from TOGETHER_API_KEY env var)
    pub api_key: String,
    /// Chat-completions endpoint URL
    pub api_url: String,
    /// Model identifier
    pub model: String,
    /// Temperature (lower = more deterministic)
    pub temperature: f64,
    /// Maximum tokens in response
    pub max_tokens: u32,
}

impl InferenceConfig {
    /// Create config from environment variables. The API key is the
    /// only required external credential and its absence is fatal.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("TOGETHER_API_KEY").context(
            "TOGETHER_API_KEY environment variable not set. \
             Set it with: export TOGETHER_API_KEY='your-api-key'",
        )?;

        Ok(Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 2000,
        })
    }

    /// Create with custom settings
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            model,
            temperature: 0.3,
            max_tokens: 2000,
        }
    }
}

/// Hosted inference API client
pub struct InferenceClient {
    client: Client,
    config: InferenceConfig,
}

impl InferenceClient {
    pub fn new(config: InferenceConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a chat request and return the first choice's message content
    pub async fn chat(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages,
            temperature: Some(self.config.temperature),
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to inference API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Inference API error: {} - {}", status, body);
        }

        let response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse inference API response")?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .context("No choices in inference API response")
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}
