//! Text-generation seam and its Messages API implementation.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use sitesmith_core::AppConfig;

use crate::error::GeneratorError;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// One prompt sent to the text-generation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub model: String,
    pub max_tokens: u32,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GenerationResponse {
    #[serde(rename = "content", default)]
    pub blocks: Vec<ContentBlock>,
}

impl GenerationResponse {
    /// Response holding a single text block.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    /// The first text block; later blocks are ignored.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.blocks.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

/// A service that turns a prompt into content blocks.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Service name for logging.
    fn name(&self) -> &str;

    /// # Errors
    ///
    /// Implementations return [`GeneratorError`] on transport or decoding
    /// failures. An empty block list is not an error at this layer.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError>;
}

pub type SharedGenerator = Arc<dyn TextGenerator>;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

/// Client for the Anthropic Messages API.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl AnthropicClient {
    /// # Errors
    ///
    /// Returns [`GeneratorError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, GeneratorError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Build from config; the credential is required here.
    ///
    /// # Errors
    ///
    /// Returns [`GeneratorError::Config`] when `ANTHROPIC_API_KEY` is unset,
    /// otherwise see [`AnthropicClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, GeneratorError> {
        let api_key = config.require_generation_key()?;
        Self::with_base_url(
            api_key,
            config.generation_timeout_secs,
            &config.generation_api_url,
        )
    }

    /// # Errors
    ///
    /// Returns [`GeneratorError::Http`] if the client cannot be constructed, or
    /// [`GeneratorError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, GeneratorError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| GeneratorError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }
}

#[async_trait]
impl TextGenerator for AnthropicClient {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResponse, GeneratorError> {
        let url = self
            .base_url
            .join("v1/messages")
            .map_err(|e| GeneratorError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        let body = MessagesRequest {
            model: &request.model,
            max_tokens: request.max_tokens,
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let started = Instant::now();
        let text = self
            .client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        tracing::debug!(
            model = %request.model,
            elapsed_ms = %started.elapsed().as_millis(),
            bytes = text.len(),
            "generation response received"
        );

        serde_json::from_str(&text).map_err(|e| GeneratorError::Deserialize {
            context: format!("messages({})", request.model),
            source: e,
        })
    }
}
