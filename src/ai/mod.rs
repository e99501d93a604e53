/// Prompts sent to the model.
pub mod prompts;

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::Config,
    http::{self, HttpError},
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Harm categories for which blocking is turned off.
const HARM_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Errors from the language model client.
#[derive(Debug, Error)]
pub enum AiError {
    /// The model returned no candidates, with the block reason if any.
    #[error("The model returned no text{}", .0.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    EmptyResponse(Option<String>),
    /// The HTTP request failed.
    #[error("Model request failed: {0}")]
    Request(#[from] HttpError),
}

type Result<T> = std::result::Result<T, AiError>;

/// A text-generation model.
#[automock]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Generates a reply for a single-turn prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// What the model decided about a group message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModerationVerdict {
    /// The message is allowed.
    Safe,
    /// The message broke a rule. Holds the model's short reprimand.
    Violation(String),
}

impl ModerationVerdict {
    /// Interprets a moderation reply. Anything but the bare word `safe`
    /// (ignoring case and surrounding whitespace) is a violation.
    pub fn from_reply(reply: &str) -> Self {
        let reply = reply.trim();
        if reply.eq_ignore_ascii_case("safe") {
            ModerationVerdict::Safe
        } else {
            ModerationVerdict::Violation(reply.to_string())
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl<'a> GenerateRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: [Content { parts: [RequestPart { text: prompt }] }],
            safety_settings: HARM_CATEGORIES
                .iter()
                .map(|&category| SafetySetting { category, threshold: "BLOCK_NONE" })
                .collect(),
        }
    }
}

impl GenerateResponse {
    fn into_text(self) -> Result<String> {
        let text = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
            .filter(|text| !text.trim().is_empty());

        text.ok_or_else(|| {
            AiError::EmptyResponse(self.prompt_feedback.and_then(|f| f.block_reason))
        })
    }
}

/// Gemini `generateContent` over plain HTTP.
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    /// Builds a client when an API key is configured. Returns `Ok(None)`
    /// otherwise.
    pub fn from_config(config: &Config) -> std::result::Result<Option<Self>, HttpError> {
        let Some(api_key) = config.gemini_api_key.clone() else {
            tracing::warn!("GEMINI_API_KEY is not set. AI features are disabled.");
            return Ok(None);
        };

        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.gemini_api_url.trim_end_matches('/'),
            config.gemini_model
        );

        Ok(Some(Self { client: http::build_client(config.http_timeout_secs)?, endpoint, api_key }))
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest::new(prompt);
        let response = http::send_json::<GenerateResponse, _>(|| {
            self.client.post(&self.endpoint).header(API_KEY_HEADER, &self.api_key).json(&body)
        })
        .await?;

        let text = response.into_text()?;
        tracing::debug!("Model replied with {} characters", text.len());
        Ok(text.trim().to_string())
    }
}
