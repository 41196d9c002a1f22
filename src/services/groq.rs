//! Groq chat-completion client
//!
//! Talks to the OpenAI-compatible chat completions endpoint with a pinned
//! model and fixed sampling parameters. The two-message prompt pairs a
//! fixed system instruction with the user's transcript and instructions
//! interpolated verbatim.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::Config;

const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";
const SUMMARY_MODEL: &str = "llama3-8b-8192";
const SUMMARY_TEMPERATURE: f32 = 0.3;
const SUMMARY_MAX_TOKENS: u32 = 2048;
const REQUEST_TIMEOUT_SECS: u64 = 30;

const SYSTEM_PROMPT: &str = "You are an expert meeting summarizer. Generate a structured summary based on the user's instructions. \n    Always maintain professionalism and clarity. Format your response appropriately based on the user's request.";

/// Returned when the provider answers with no choices
const SUMMARY_FALLBACK: &str = "No summary generated";

/// Groq client errors
#[derive(Debug, Error)]
pub enum GroqError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Chat message sent to the provider
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

/// Chat completion response body (fields we consume)
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Groq API client
#[derive(Debug, Clone)]
pub struct GroqClient {
    http_client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl GroqClient {
    pub fn new(api_key: String) -> Result<Self, GroqError> {
        Self::with_base_url(api_key, GROQ_API_BASE.to_string())
    }

    /// Build a client against a non-default API base (alternate
    /// OpenAI-compatible deployments, stub servers in tests)
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, GroqError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GroqError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key,
            base_url,
        })
    }

    /// Generate a summary for a transcript under the given instructions
    pub async fn summarize(&self, transcript: &str, prompt: &str) -> Result<String, GroqError> {
        let request = ChatCompletionRequest {
            model: SUMMARY_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: build_user_prompt(transcript, prompt),
                },
            ],
            temperature: SUMMARY_TEMPERATURE,
            max_tokens: SUMMARY_MAX_TOKENS,
        };

        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(url = %url, model = SUMMARY_MODEL, "Requesting chat completion");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GroqError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(GroqError::ApiError(status.as_u16(), error_text));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GroqError::ParseError(e.to_string()))?;

        let summary = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| SUMMARY_FALLBACK.to_string());

        info!(chars = summary.len(), "Received summary from completion provider");

        Ok(summary)
    }
}

/// Interpolate transcript and instructions into the user message
fn build_user_prompt(transcript: &str, prompt: &str) -> String {
    format!(
        "Transcript: {}\n\nInstructions: {}\n\nPlease provide a structured summary based on these instructions.",
        transcript, prompt
    )
}

/// Summarization capability, resolved once at startup
#[derive(Debug, Clone)]
pub enum Summarizer {
    Configured(GroqClient),
    Unconfigured,
}

impl Summarizer {
    /// Resolve the capability from configuration
    pub fn from_config(config: &Config) -> Result<Self, GroqError> {
        match &config.groq_api_key {
            Some(key) => {
                let client = match &config.groq_api_base {
                    Some(base) => GroqClient::with_base_url(key.clone(), base.clone())?,
                    None => GroqClient::new(key.clone())?,
                };
                info!("Summarizer configured (model: {})", SUMMARY_MODEL);
                Ok(Summarizer::Configured(client))
            }
            None => {
                tracing::warn!(
                    "Groq API key not configured. AI summarization will not work. \
                     Set RECAP_GROQ_API_KEY to enable it."
                );
                Ok(Summarizer::Unconfigured)
            }
        }
    }
}
