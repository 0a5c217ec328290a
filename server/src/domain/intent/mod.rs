//! Natural language to FilterSet translation through a completion model

mod extract;
mod prompt;

pub use extract::extract_json_object;
pub use prompt::system_prompt;

use std::sync::Arc;

use bookshelf_sdk::{ChatCompletion, ChatMessage, ChatRequest, CompletionError};
use serde_json::Value;
use thiserror::Error;

use crate::core::config::CompletionConfig;
use crate::domain::filters::{FilterSet, RawClause, UnknownColumn};

#[derive(Error, Debug)]
pub enum TranslateError {
    #[error("Completion request failed: {0}")]
    Completion(#[from] CompletionError),

    #[error("Model response does not contain a JSON object")]
    NoJsonObject,

    #[error("Model response is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Model response has an invalid filters list: {0}")]
    InvalidShape(#[source] serde_json::Error),

    #[error("Model response filters on an {0}")]
    UnknownColumn(#[from] UnknownColumn),
}

#[derive(Debug, Clone)]
pub struct IntentTranslator {
    client: Arc<dyn ChatCompletion>,
    model: String,
    temperature: f32,
    json_mode: bool,
    system_prompt: String,
}

impl IntentTranslator {
    pub fn new(client: Arc<dyn ChatCompletion>, config: &CompletionConfig, table: &str) -> Self {
        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            json_mode: config.json_mode,
            system_prompt: system_prompt(table),
        }
    }

    fn request_for(&self, text: &str) -> ChatRequest {
        let request = ChatRequest::new(&self.model)
            .message(ChatMessage::system(&self.system_prompt))
            .message(ChatMessage::user(text))
            .temperature(self.temperature);
        if self.json_mode {
            request.json_output()
        } else {
            request
        }
    }

    pub async fn translate(&self, text: &str) -> Result<FilterSet, TranslateError> {
        let request = self.request_for(text);
        let response = self.client.complete(&request).await.inspect_err(|e| {
            tracing::warn!(provider = self.client.name(), error = %e, "Completion request failed");
        })?;
        tracing::debug!(response = %response, "Model response");

        let filters = parse_response(&response).inspect_err(|e| {
            tracing::warn!(error = %e, response = %response, "Could not read filters from model response");
        })?;
        tracing::info!(
            clauses = filters.len(),
            skipped = filters.skipped().len(),
            "Translated query into filters"
        );
        Ok(filters)
    }
}

/// Read the filters object out of a model response.
///
/// A missing `filters` key means no filters (every row).
pub fn parse_response(response: &str) -> Result<FilterSet, TranslateError> {
    let json = extract_json_object(response).ok_or(TranslateError::NoJsonObject)?;
    let value: Value = serde_json::from_str(json).map_err(TranslateError::InvalidJson)?;

    match value.get("filters") {
        None => Ok(FilterSet::default()),
        Some(filters) => {
            let raw: Vec<RawClause> =
                serde_json::from_value(filters.clone()).map_err(TranslateError::InvalidShape)?;
            Ok(FilterSet::from_raw(raw)?)
        }
    }
}
