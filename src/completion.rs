//! Completion provider client
//!
//! This module is the outbound HTTP seam: a trait over "send one chat
//! completion" plus the reqwest-backed implementation speaking the
//! OpenAI-compatible wire format with bearer authentication. The trait
//! exists so the orchestrator can be exercised in tests without a
//! network.

use crate::config::ProviderConfig;
use crate::{Result, WanderplanError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// One chat-completion invocation
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier
    pub model: String,
    /// Single user-role prompt
    pub prompt: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Ask the provider for its structured-JSON response mode
    pub json_mode: bool,
    /// Budget remaining for this call
    pub timeout: Duration,
}

/// Abstraction over the completion provider
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one completion request and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<String>;

    /// Lightweight reachability check against the provider.
    async fn probe(&self) -> bool;
}

/// Reqwest-backed client for an OpenAI-compatible provider
pub struct CompletionClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CompletionClient {
    /// Create a new completion client from provider configuration
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("wanderplan/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| WanderplanError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        // An absent credential is not an error here: the call goes out
        // anyway and surfaces the provider's own rejection status.
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }
}

#[async_trait]
impl CompletionBackend for CompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest::from(&request);

        debug!(
            model = %request.model,
            temperature = request.temperature,
            json_mode = request.json_mode,
            timeout_ms = request.timeout.as_millis() as u64,
            "Sending completion request"
        );

        let response = self
            .authorize(self.client.post(&url))
            .timeout(request.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WanderplanError::Timeout {
                        phase: "completion call",
                    }
                } else {
                    WanderplanError::api(format!("Completion request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Completion provider rejected the request");
            return Err(WanderplanError::upstream(status.as_u16(), detail));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| WanderplanError::api(format!("Failed to parse completion response: {e}")))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| WanderplanError::api("Completion response missing choices[0] content"))?;

        debug!(content_len = content.len(), "Completion received");
        Ok(content)
    }

    async fn probe(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        match self.authorize(self.client.get(&url)).send().await {
            Ok(response) => {
                let reachable = response.status().is_success();
                debug!(status = response.status().as_u16(), reachable, "Probe completed");
                reachable
            }
            Err(e) => {
                debug!("Probe failed: {e}");
                false
            }
        }
    }
}

/// Chat-completion request body (OpenAI-compatible)
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

impl From<&CompletionRequest> for ChatRequest {
    fn from(request: &CompletionRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: request.prompt.clone(),
            }],
            temperature: request.temperature,
            response_format: request.json_mode.then_some(ResponseFormat {
                format_type: "json_object",
            }),
        }
    }
}

/// Chat-completion response body (OpenAI-compatible)
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
    content: Option<String>,
}
