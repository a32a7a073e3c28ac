//! Client for a hosted vision-language model.
//!
//! Speaks the OpenAI-compatible chat-completions protocol: one user message
//! carrying the prompt and the image as a `data:` URL, answer text in
//! `choices[0].message.content`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::VisionError;
use crate::config::VisionSettings;

/// Instruction sent with every image.
pub const IDENTIFICATION_PROMPT: &str = "You are a botanist specializing in the native flora of the \
Pacific Northwest (Washington, Oregon, Idaho and northern California). Identify the plant in this \
photo. Respond with a single JSON object and nothing else, using these keys: \
\"scientific_name\" (string), \"common_name\" (string), \"confidence\" (number between 0 and 1), \
\"description\" (one or two sentences on identifying features), \"is_native\" (\"yes\" or \"no\", \
native to the Pacific Northwest), \"taxon_id\" (iNaturalist taxon id if known, else null), \
\"alternatives\" (up to two objects with \"scientific_name\" and \"common_name\" for other likely species).";

const MAX_TOKENS: u32 = 500;

/// A model that can describe an image in response to a prompt.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Return the model's raw reply text.
    async fn describe(&self, image_data_url: &str, prompt: &str) -> Result<String, VisionError>;
}

/// reqwest-backed chat-completions client.
#[derive(Debug, Clone)]
pub struct ChatVisionClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<serde_json::Value>,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatVisionClient {
    /// Build a client; fails with [`VisionError::MissingCredentials`]
    /// when no API key is configured.
    pub fn new(settings: &VisionSettings) -> Result<Self, VisionError> {
        let api_key = settings
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(VisionError::MissingCredentials)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| VisionError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
            model: settings.model.clone(),
            api_key,
        })
    }
}

#[async_trait]
impl VisionModel for ChatVisionClient {
    async fn describe(&self, image_data_url: &str, prompt: &str) -> Result<String, VisionError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![json!({
                "role": "user",
                "content": [
                    { "type": "text", "text": prompt },
                    { "type": "image_url", "image_url": { "url": image_data_url } }
                ]
            })],
            max_tokens: MAX_TOKENS,
        };

        debug!(model = %self.model, "Calling vision model");
        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| VisionError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VisionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| VisionError::MalformedReply(e.to_string()))?;

        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| VisionError::MalformedReply("empty completion".to_string()))
    }
}
