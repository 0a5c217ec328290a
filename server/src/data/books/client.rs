//! Book table access over the PostgREST HTTP interface

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};

use super::error::TableError;
use super::query::TableQuery;
use super::types::BookRecord;
use crate::core::config::TableConfig;
use crate::core::constants::TABLE_REST_PATH;

/// Source of book rows for a composed query
#[async_trait]
pub trait BookStore: Send + Sync + std::fmt::Debug {
    async fn fetch(&self, query: &TableQuery) -> Result<Vec<BookRecord>, TableError>;

    /// Table the store reads from
    fn table(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct RestTableClient {
    http: reqwest::Client,
    endpoint: String,
    table: String,
}

impl RestTableClient {
    pub fn new(config: &TableConfig, api_key: &str) -> Result<Self, TableError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(TableError::Config("API key must not be empty".into()));
        }

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|e| TableError::Config(format!("invalid API key: {}", e)))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| TableError::Config(format!("invalid API key: {}", e)))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("apikey"), key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("bookshelf/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        let endpoint = format!(
            "{}/{}/{}",
            config.url.trim_end_matches('/'),
            TABLE_REST_PATH,
            config.name
        );
        tracing::debug!(endpoint = %endpoint, "Table client initialized");

        Ok(Self {
            http,
            endpoint,
            table: config.name.clone(),
        })
    }

    fn url_for(&self, query: &TableQuery) -> Result<Url, TableError> {
        Url::parse_with_params(&self.endpoint, query.to_pairs())
            .map_err(|e| TableError::Config(format!("invalid table URL {}: {}", self.endpoint, e)))
    }
}

#[async_trait]
impl BookStore for RestTableClient {
    async fn fetch(&self, query: &TableQuery) -> Result<Vec<BookRecord>, TableError> {
        let url = self.url_for(query)?;
        tracing::debug!(
            table = %self.table,
            predicates = query.predicates().len(),
            "Querying table"
        );

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TableError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        let rows: Vec<BookRecord> =
            serde_json::from_slice(&bytes).map_err(|e| TableError::Decode(e.to_string()))?;
        tracing::debug!(table = %self.table, rows = rows.len(), "Table query finished");
        Ok(rows)
    }

    fn table(&self) -> &str {
        &self.table
    }
}
