//! AI backend abstraction.
//!
//! Supports multiple AI backends:
//! - Local: Ollama (default)
//! - Remote: Gemini (feature-flagged)

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::AgentError;

/// AI backend configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend")]
pub enum AiBackendConfig {
    /// Local Ollama instance
    #[serde(rename = "ollama")]
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
        #[serde(default = "default_ollama_model")]
        model: String,
        #[serde(default = "default_timeout")]
        timeout_seconds: u64,
    },

    /// Google Gemini API (requires feature flag)
    #[cfg(feature = "remote-ai")]
    #[serde(rename = "gemini")]
    Gemini {
        #[serde(default = "default_gemini_key_env")]
        api_key_env: String,
        #[serde(default = "default_gemini_model")]
        model: String,
        #[serde(default = "default_timeout")]
        timeout_seconds: u64,
    },
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.2".to_string()
}

#[cfg(feature = "remote-ai")]
fn default_gemini_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}

#[cfg(feature = "remote-ai")]
fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_timeout() -> u64 {
    120
}

impl Default for AiBackendConfig {
    fn default() -> Self {
        AiBackendConfig::Ollama {
            base_url: default_ollama_url(),
            model: default_ollama_model(),
            timeout_seconds: default_timeout(),
        }
    }
}

impl AiBackendConfig {
    pub fn timeout_seconds(&self) -> u64 {
        match self {
            AiBackendConfig::Ollama {
                timeout_seconds, ..
            } => *timeout_seconds,
            #[cfg(feature = "remote-ai")]
            AiBackendConfig::Gemini {
                timeout_seconds, ..
            } => *timeout_seconds,
        }
    }
}

/// A message in a conversation with the AI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Request to the AI backend.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub json_mode: bool,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_tokens: None,
            json_mode: false,
        }
    }

    pub fn with_json_mode(mut self) -> Self {
        self.json_mode = true;
        self
    }

    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// Response from the AI backend.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub content: String,
    pub model: String,
    pub tokens_used: Option<TokenUsage>,
}

#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Trait for AI backends.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &'static str;

    /// Send a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AgentError>;
}

fn build_client(timeout_seconds: u64) -> Result<reqwest::Client, AgentError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| AgentError::Misconfigured(format!("HTTP client: {}", e)))
}

/// Ollama backend implementation.
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    pub fn new(base_url: String, model: String, timeout_seconds: u64) -> Result<Self, AgentError> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }
}

/// Ollama API request format.
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'static str>,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize, Default)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

/// Ollama API response format.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaResponseMessage,
    model: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    content: String,
}

#[async_trait]
impl AiBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AgentError> {
        let url = format!("{}/api/chat", self.base_url);

        let body = OllamaRequest {
            model: &self.model,
            messages: request
                .messages
                .into_iter()
                .map(|m| OllamaMessage {
                    role: m.role.as_str(),
                    content: m.content,
                })
                .collect(),
            stream: false,
            format: request.json_mode.then_some("json"),
            options: OllamaOptions {
                temperature: request.temperature,
                num_predict: request.max_tokens,
            },
        };

        debug!("Sending request to Ollama: {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::BackendUnavailable(format!(
                "Ollama returned {}: {}",
                status, body
            )));
        }

        let parsed: OllamaResponse = response
            .json()
            .await
            .map_err(|e| AgentError::ResponseParseError(e.to_string()))?;

        let tokens_used = match (parsed.prompt_eval_count, parsed.eval_count) {
            (Some(prompt), Some(completion)) => Some(TokenUsage {
                prompt_tokens: prompt,
                completion_tokens: completion,
                total_tokens: prompt + completion,
            }),
            _ => None,
        };

        Ok(ChatResponse {
            content: parsed.message.content,
            model: parsed.model,
            tokens_used,
        })
    }
}

// --- Gemini backend ---

#[cfg(feature = "remote-ai")]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GeminiGenerationConfig,
}

#[cfg(feature = "remote-ai")]
#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[cfg(feature = "remote-ai")]
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[cfg(feature = "remote-ai")]
#[derive(Debug, Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

#[cfg(feature = "remote-ai")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    model_version: Option<String>,
}

#[cfg(feature = "remote-ai")]
#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[cfg(feature = "remote-ai")]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
    #[serde(default)]
    total_token_count: u32,
}

/// Gemini `generateContent` backend implementation.
#[cfg(feature = "remote-ai")]
pub struct GeminiBackend {
    client: reqwest::Client,
    model: String,
    api_key: String,
}

#[cfg(feature = "remote-ai")]
impl GeminiBackend {
    pub fn new(api_key: String, model: String, timeout_seconds: u64) -> Result<Self, AgentError> {
        Ok(Self {
            client: build_client(timeout_seconds)?,
            model,
            api_key,
        })
    }

    pub fn from_env(
        api_key_env: &str,
        model: String,
        timeout_seconds: u64,
    ) -> Result<Self, AgentError> {
        let api_key = std::env::var(api_key_env).map_err(|_| {
            AgentError::Misconfigured(format!("{} env var not set", api_key_env))
        })?;
        Self::new(api_key, model, timeout_seconds)
    }

    fn build_request(&self, request: ChatRequest) -> GeminiRequest {
        let mut system_parts: Vec<GeminiPart> = Vec::new();
        let mut contents: Vec<GeminiContent> = Vec::new();

        for msg in request.messages {
            match msg.role {
                MessageRole::System => system_parts.push(GeminiPart { text: msg.content }),
                MessageRole::User => contents.push(GeminiContent {
                    role: Some("user".to_string()),
                    parts: vec![GeminiPart { text: msg.content }],
                }),
                MessageRole::Assistant => contents.push(GeminiContent {
                    role: Some("model".to_string()),
                    parts: vec![GeminiPart { text: msg.content }],
                }),
            }
        }

        let system_instruction = if system_parts.is_empty() {
            None
        } else {
            Some(GeminiContent {
                role: None,
                parts: system_parts,
            })
        };

        GeminiRequest {
            contents,
            system_instruction,
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_tokens,
                response_mime_type: request.json_mode.then_some("application/json"),
            },
        }
    }
}

#[cfg(feature = "remote-ai")]
#[async_trait]
impl AiBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, AgentError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );
        let body = self.build_request(request);

        debug!("Sending request to Gemini model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AgentError::BackendUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AgentError::BackendUnavailable(format!(
                "Gemini API returned {}: {}",
                status, body
            )));
        }

        let body_text = response
            .text()
            .await
            .map_err(|e| AgentError::ResponseParseError(e.to_string()))?;

        let parsed: GeminiResponse = serde_json::from_str(&body_text).map_err(|e| {
            tracing::warn!(
                "Failed to parse Gemini response: {}. Body: {}",
                e,
                super::log_snippet(&body_text, 500)
            );
            AgentError::ResponseParseError(format!("Invalid JSON from Gemini: {}", e))
        })?;

        let content = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .ok_or_else(|| {
                AgentError::ResponseParseError("Gemini returned no candidates".to_string())
            })?;

        let tokens_used = parsed.usage_metadata.map(|u| TokenUsage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
            total_tokens: u.total_token_count,
        });

        Ok(ChatResponse {
            content,
            model: parsed.model_version.unwrap_or_else(|| self.model.clone()),
            tokens_used,
        })
    }
}

/// Create an AI backend from configuration.
pub fn create_backend(config: &AiBackendConfig) -> Result<Arc<dyn AiBackend>, AgentError> {
    match config {
        AiBackendConfig::Ollama {
            base_url,
            model,
            timeout_seconds,
        } => Ok(Arc::new(OllamaBackend::new(
            base_url.clone(),
            model.clone(),
            *timeout_seconds,
        )?)),
        #[cfg(feature = "remote-ai")]
        AiBackendConfig::Gemini {
            api_key_env,
            model,
            timeout_seconds,
        } => Ok(Arc::new(GeminiBackend::from_env(
            api_key_env,
            model.clone(),
            *timeout_seconds,
        )?)),
    }
}

/// Mock backend for testing.
#[cfg(test)]
pub struct MockBackend {
    response: Result<String, String>,
}

#[cfg(test)]
impl MockBackend {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Ok(response.into()),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
        }
    }
}

#[cfg(test)]
#[async_trait]
impl AiBackend for MockBackend {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse, AgentError> {
        match &self.response {
            Ok(content) => Ok(ChatResponse {
                content: content.clone(),
                model: "mock".to_string(),
                tokens_used: None,
            }),
            Err(message) => Err(AgentError::BackendUnavailable(message.clone())),
        }
    }
}
