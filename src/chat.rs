//! One-shot chat completion
//!
//! Sends a single user message to an OpenAI-compatible
//! `/chat/completions` endpoint and returns the first answer. No retry,
//! no streaming, no conversation history.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ChatConfig;
use crate::error::{Result, SockError};

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: AnswerMessage,
}

#[derive(Deserialize, Debug)]
struct AnswerMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Blocking chat-completion client
pub struct ChatClient {
    config: ChatConfig,
    http: reqwest::blocking::Client,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if config.timeout_ms > 0 {
            builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        }
        let http = builder.build()?;
        Ok(Self { config, http })
    }

    /// Ask one question, return the model's first answer
    pub fn complete(&self, prompt: &str) -> Result<String> {
        let url = self.config.completions_url();
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
        };

        tracing::debug!(model = %self.config.model, %url, "Sending chat completion");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(SockError::Chat(format!("{}: {}", status, detail.trim())));
        }

        let text = response.text()?;
        parse_answer(&text)
    }
}

/// Pull the first choice's content out of a response body
fn parse_answer(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| SockError::Chat(format!("malformed response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| SockError::Chat("response contained no answer".to_string()))
}
