use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::ModelError;
use crate::schema::{DecodingOptions, Message, ModelPrompt, ModelResponse};

#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Send a chat prompt, constrained by `prompt.schema` when present.
    async fn prompt_model(
        &self,
        model_id: &str,
        prompt: &ModelPrompt,
    ) -> Result<ModelResponse, ModelError>;

    /// Single-prompt completion, returns the raw generated text.
    async fn complete(
        &self,
        model_id: &str,
        prompt: &str,
        options: &DecodingOptions,
    ) -> Result<String, ModelError>;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Ollama API endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Model used for company extraction
    #[serde(default = "default_model")]
    pub model: String,
    /// Smaller model used to pick social links out of page excerpts
    #[serde(default = "default_social_model")]
    pub social_model: String,
    #[serde(default = "default_num_ctx")]
    pub num_ctx: u32,
    /// Maximum characters of page content embedded in a prompt
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_social_model() -> String {
    "phi3:mini".to_string()
}

fn default_num_ctx() -> u32 {
    32768
}

fn default_max_prompt_chars() -> usize {
    60_000
}

fn default_timeout_secs() -> u64 {
    300
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            social_model: default_social_model(),
            num_ctx: default_num_ctx(),
            max_prompt_chars: default_max_prompt_chars(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Recognized keys: `OLLAMA_ENDPOINT`, `OLLAMA_MODEL`, `OLLAMA_SOCIAL_MODEL`,
    /// `OLLAMA_NUM_CTX`, `MAX_PROMPT_CHARS`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("OLLAMA_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            self.model = model;
        }
        if let Some(model) = lookup("OLLAMA_SOCIAL_MODEL") {
            self.social_model = model;
        }
        if let Some(raw) = lookup("OLLAMA_NUM_CTX") {
            match raw.parse() {
                Ok(n) => self.num_ctx = n,
                Err(_) => warn!(value = %raw, "Ignoring invalid OLLAMA_NUM_CTX"),
            }
        }
        if let Some(raw) = lookup("MAX_PROMPT_CHARS") {
            match raw.parse() {
                Ok(n) => self.max_prompt_chars = n,
                Err(_) => warn!(value = %raw, "Ignoring invalid MAX_PROMPT_CHARS"),
            }
        }
        self
    }
}

#[derive(Clone)]
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a Value>, // JSON schema for structured output
    stream: bool,
    options: &'a DecodingOptions,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
    /// Nanoseconds
    #[serde(default)]
    total_duration: u64,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: &'a DecodingOptions,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaClient {
    pub fn new(config: &ModelConfig) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn post<T, R>(&self, path: &str, body: &T) -> Result<R, ModelError>
    where
        T: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ModelError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChatModel for OllamaClient {
    async fn prompt_model(
        &self,
        model_id: &str,
        prompt: &ModelPrompt,
    ) -> Result<ModelResponse, ModelError> {
        let request = ChatRequest {
            model: model_id,
            messages: &prompt.messages,
            format: prompt.schema.as_ref(),
            stream: false,
            options: &prompt.options,
        };

        let response: ChatResponse = self.post("/api/chat", &request).await?;
        let duration = response.total_duration as f64 / 1_000_000_000.0;

        debug!(model = model_id, duration, "Chat response received");

        Ok(ModelResponse {
            content: response.message.content,
            duration,
        })
    }

    async fn complete(
        &self,
        model_id: &str,
        prompt: &str,
        options: &DecodingOptions,
    ) -> Result<String, ModelError> {
        let request = GenerateRequest {
            model: model_id,
            prompt,
            stream: false,
            options,
        };

        let response: GenerateResponse = self.post("/api/generate", &request).await?;
        Ok(response.response)
    }
}
