//! OpenAI-compatible chat-completions synthesizer.

use anyhow::{anyhow, Context, Result};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use docqa_core::config::SynthesisSettings;
use docqa_core::traits::AnswerSynthesizer;
use docqa_core::types::RetrievedChunk;
use docqa_retrieve::build_prompt;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct OpenAiSynthesizer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiSynthesizer {
    /// `None` when synthesis is disabled or the API key variable is unset.
    pub fn from_settings(settings: &SynthesisSettings) -> Result<Option<Self>> {
        if !settings.enabled {
            return Ok(None);
        }
        let api_key = match std::env::var(&settings.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                info!(var = %settings.api_key_env, "no API key, answers will be retrieved context only");
                return Ok(None);
            }
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Some(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.api_base.trim_end_matches('/')),
            model: settings.model.clone(),
            api_key,
        }))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Extract the first choice's message text from a chat-completions response body.
pub fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body).context("Malformed chat completion")?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("chat completion returned no content"))
}

impl AnswerSynthesizer for OpenAiSynthesizer {
    fn synthesize(&self, question: &str, context: &[RetrievedChunk]) -> Result<String> {
        let prompt = build_prompt(question, context);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: &prompt }],
        };
        debug!(endpoint = %self.endpoint, model = %self.model, "requesting completion");
        let body = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?
            .error_for_status()?
            .text()?;
        parse_completion(&body)
    }
}
