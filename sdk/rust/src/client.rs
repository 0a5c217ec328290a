use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};

use crate::error::CompletionError;
use crate::types::{ChatRequest, ChatResponse};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_USER_AGENT: &str = concat!("bookshelf-sdk/", env!("CARGO_PKG_VERSION"));

/// A hosted model that turns a chat request into text
#[async_trait]
pub trait ChatCompletion: Send + Sync + std::fmt::Debug {
    /// Send the request and return the first choice's text (trimmed)
    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError>;

    /// Human-readable provider name
    fn name(&self) -> &'static str;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    pub fn builder(base_url: impl Into<String>, api_key: impl Into<String>) -> OpenAiClientBuilder {
        OpenAiClientBuilder {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

pub struct OpenAiClientBuilder {
    base_url: String,
    api_key: String,
    timeout: Duration,
    user_agent: String,
}

impl OpenAiClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn build(self) -> Result<OpenAiClient, CompletionError> {
        if self.api_key.trim().is_empty() {
            return Err(CompletionError::Config("API key must not be empty".into()));
        }

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", self.api_key.trim()))
            .map_err(|e| CompletionError::Config(format!("invalid API key: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| CompletionError::Config(format!("failed to build HTTP client: {}", e)))?;

        let base_url = self.base_url.trim_end_matches('/').to_string();
        tracing::debug!(base_url = %base_url, "Completion client initialized");

        Ok(OpenAiClient { http, base_url })
    }
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        let url = self.completions_url();
        tracing::debug!(
            url = %url,
            model = %request.model,
            messages = request.messages.len(),
            "Sending completion request"
        );

        let resp = self.http.post(&url).json(request).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: ChatResponse = resp.json().await?;
        let usage = body.usage.unwrap_or_default();
        tracing::debug!(
            model = body.model.as_deref().unwrap_or(request.model.as_str()),
            finish_reason = body.finish_reason().unwrap_or("unknown"),
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            total_tokens = usage.total_tokens,
            "Completion finished"
        );

        body.first_content()
            .map(str::to_string)
            .ok_or(CompletionError::EmptyResponse)
    }

    fn name(&self) -> &'static str {
        "OpenAI-compatible"
    }
}
