/// LLM Client — the single point of entry for all model calls in the interviewer.
///
/// ARCHITECTURAL RULE: No other module may call a model provider directly.
/// The dialogue controller only ever sees the `GenerationService` trait, so any
/// provider (or a scripted stub in tests) can stand behind it.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const HUGGINGFACE_API_URL: &str = "https://api-inference.huggingface.co/models";

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_HUGGINGFACE_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("generation timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

/// Which hosted model API backs the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    Anthropic,
    HuggingFace,
}

impl LlmProvider {
    pub fn default_model(self) -> &'static str {
        match self {
            LlmProvider::Anthropic => DEFAULT_ANTHROPIC_MODEL,
            LlmProvider::HuggingFace => DEFAULT_HUGGINGFACE_MODEL,
        }
    }

    /// Environment variable holding the credential for this provider.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
            LlmProvider::HuggingFace => "HUGGINGFACEHUB_API_TOKEN",
        }
    }
}

impl std::str::FromStr for LlmProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(LlmProvider::Anthropic),
            "huggingface" | "hf" => Ok(LlmProvider::HuggingFace),
            other => Err(format!(
                "unknown LLM provider '{other}' (expected 'anthropic' or 'huggingface')"
            )),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProvider::Anthropic => f.write_str("anthropic"),
            LlmProvider::HuggingFace => f.write_str("huggingface"),
        }
    }
}

/// Connection and sampling settings for `LlmClient`.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: LlmProvider,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// HTTP-level timeout. The controller applies its own bound on top.
    pub request_timeout: Duration,
}

/// The text-generation capability the dialogue controller depends on.
///
/// Carried by the controller as `Arc<dyn GenerationService>`.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Sends one prompt and returns the raw response text. One attempt, no retry.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

#[derive(Debug, Serialize)]
struct HfRequest {
    inputs: String,
    parameters: HfParameters,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<HfOptions>,
}

#[derive(Debug, Serialize)]
struct HfParameters {
    max_new_tokens: u32,
    temperature: f32,
    return_full_text: bool,
}

#[derive(Debug, Serialize)]
struct HfOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct HfGeneration {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct HfError {
    error: String,
}

/// The single LLM client used by the interviewer.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    settings: LlmSettings,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;
        Ok(Self { client, settings })
    }

    pub fn provider(&self) -> LlmProvider {
        self.settings.provider
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    /// Makes a raw call to the Anthropic Messages API, returning the full response object.
    pub async fn call_anthropic(&self, prompt: &str, system: &str) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.settings.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "Anthropic call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }

    /// Makes a raw call to the Hugging Face inference API and returns the generated text.
    pub async fn call_huggingface(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let url = format!("{HUGGINGFACE_API_URL}/{}", self.settings.model);
        let request_body = HfRequest {
            inputs: format_instruct_prompt(system, prompt),
            parameters: HfParameters {
                max_new_tokens: self.settings.max_tokens,
                temperature: self.settings.temperature,
                return_full_text: false,
            },
            options: Some(HfOptions {
                wait_for_model: true,
            }),
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<HfError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generations: Vec<HfGeneration> = serde_json::from_str(&body)?;
        let text = generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or(LlmError::EmptyContent)?;

        debug!(
            "Hugging Face call succeeded: model={}, chars={}",
            self.settings.model,
            text.len()
        );

        Ok(text)
    }
}

#[async_trait]
impl GenerationService for LlmClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        match self.settings.provider {
            LlmProvider::Anthropic => {
                let response = self.call_anthropic(prompt, prompts::INTERVIEWER_SYSTEM).await?;
                response
                    .text()
                    .map(str::to_string)
                    .ok_or(LlmError::EmptyContent)
            }
            LlmProvider::HuggingFace => {
                self.call_huggingface(prompt, prompts::INTERVIEWER_SYSTEM)
                    .await
            }
        }
    }
}

/// Wraps system + user text in the `[INST]` format Mistral-family models expect.
fn format_instruct_prompt(system: &str, prompt: &str) -> String {
    format!("<s>[INST] {system}\n\n{} [/INST]", prompt.trim())
}
