//! LLM agent module for summarization.
//!
//! Sends the whole document in a single chat completion request; there is no
//! chunking, so very long documents are bounded only by the model's context window.

use crate::fetcher::ContentDocument;
use crate::request::{ApiKey, ModelName, Request};
pub use crate::summary::Summary;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const PROMPT_TEMPLATE: &str = "
You are a helpful assistant. Summarize the following content clearly and concisely.
Focus on the key points, main idea, and any technical or medical insights that stand out.

Content: {text}
";

#[derive(Error, Debug)]
pub enum SummarizationError {
    #[error("LLM request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid API key: {0}")]
    InvalidCredential(String),
    #[error("rate limited: {0}")]
    RateLimited(String),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("model returned no content")]
    EmptyResponse,
}

/// Sampling parameters and credential for one call
#[derive(Debug, Clone)]
pub struct SummaryParams {
    pub model: ModelName,
    pub temperature: f32,
    pub max_tokens: u32,
    pub api_key: ApiKey,
}

impl From<&Request> for SummaryParams {
    fn from(request: &Request) -> Self {
        Self {
            model: request.model_name,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            api_key: request.api_credential.clone(),
        }
    }
}

/// A hosted capability that condenses a document
pub trait Summarizer {
    fn summarize(
        &self,
        doc: &ContentDocument,
        params: &SummaryParams,
    ) -> impl Future<Output = Result<Summary, SummarizationError>> + Send;
}

/// Embed the document verbatim in the instruction template
pub fn build_prompt(text: &str) -> String {
    PROMPT_TEMPLATE.replace("{text}", text)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// OpenAI chat completions client
#[derive(Debug, Clone)]
pub struct OpenAIClient {
    client: Client,
    base_url: String,
}

impl OpenAIClient {
    pub fn new(timeout: Duration) -> Result<Self, SummarizationError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.into(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

impl Summarizer for OpenAIClient {
    #[tracing::instrument(skip_all, fields(model = %params.model))]
    async fn summarize(
        &self,
        doc: &ContentDocument,
        params: &SummaryParams,
    ) -> Result<Summary, SummarizationError> {
        let prompt = build_prompt(&doc.text);
        let body = ChatRequest {
            model: params.model.as_str(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
        };

        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(params.api_key.expose())
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::debug!(error = %e, "chat completion request failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_api_error(status, &body));
        }

        let response = resp.json::<CompletionResponse>().await?;
        summary_from_response(response)
    }
}

/// Map a failed HTTP response to the matching error
fn classify_api_error(status: StatusCode, body: &str) -> SummarizationError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SummarizationError::InvalidCredential(message)
        }
        StatusCode::TOO_MANY_REQUESTS => SummarizationError::RateLimited(message),
        _ => SummarizationError::Api {
            status: status.as_u16(),
            message,
        },
    }
}

fn summary_from_response(response: CompletionResponse) -> Result<Summary, SummarizationError> {
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(SummarizationError::EmptyResponse)?;

    Ok(Summary::new(text))
}
