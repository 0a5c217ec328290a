//! Search pipeline: translate, build the query, fetch, summarize

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use bookshelf_sdk::ChatCompletion;
use serde::Serialize;
use thiserror::Error;

use super::filters::FilterSet;
use super::intent::{IntentTranslator, TranslateError};
use super::summary::BookSummary;
use crate::core::config::CompletionConfig;
use crate::data::books::{BookRecord, BookStore, TableError};

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Please enter a query.")]
    EmptyQuery,

    #[error("Could not understand the query: {0}")]
    Translation(#[from] TranslateError),

    #[error("Could not fetch books: {0}")]
    Execution(#[from] TableError),
}

/// Canned searches offered as shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickFilter {
    Expensive,
    LowStock,
    Cheap,
}

impl QuickFilter {
    pub const ALL: [QuickFilter; 3] = [Self::Expensive, Self::LowStock, Self::Cheap];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Expensive => "expensive",
            Self::LowStock => "low-stock",
            Self::Cheap => "cheap",
        }
    }

    /// Natural-language query sent through the translator
    pub fn query(&self) -> &'static str {
        match self {
            Self::Expensive => "books with price greater than 1000",
            Self::LowStock => "books with stock less than 5",
            Self::Cheap => "books with price less than 500",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Expensive => "Expensive Books (>1000)",
            Self::LowStock => "Low Stock Books (<5)",
            Self::Cheap => "Cheap Books (<500)",
        }
    }
}

impl fmt::Display for QuickFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for QuickFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| {
                format!(
                    "unknown quick filter '{}' (expected one of: expensive, low-stock, cheap)",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub title: String,
    pub filters: FilterSet,
    pub books: Vec<BookRecord>,
    pub summary: BookSummary,
}

/// Owns the translator and the book store for the lifetime of the app
#[derive(Debug)]
pub struct BookSearchService {
    translator: IntentTranslator,
    store: Arc<dyn BookStore>,
}

impl BookSearchService {
    pub fn new(
        completion: Arc<dyn ChatCompletion>,
        store: Arc<dyn BookStore>,
        config: &CompletionConfig,
    ) -> Self {
        let translator = IntentTranslator::new(completion, config, store.table());
        Self { translator, store }
    }

    pub async fn search(&self, text: &str) -> Result<SearchResults, SearchError> {
        let query = text.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }
        self.run(query, format!("Results for: '{}'", query)).await
    }

    pub async fn quick(&self, filter: QuickFilter) -> Result<SearchResults, SearchError> {
        self.run(filter.query(), filter.title().to_string()).await
    }

    async fn run(&self, query: &str, title: String) -> Result<SearchResults, SearchError> {
        let filters = self.translator.translate(query).await?;

        let table_query = filters.to_query();
        let books = self.store.fetch(&table_query).await.inspect_err(|e| {
            tracing::warn!(table = self.store.table(), error = %e, "Table query failed");
        })?;
        let summary = BookSummary::from_books(&books);
        tracing::info!(
            query = %query,
            clauses = filters.len(),
            rows = books.len(),
            "Search finished"
        );

        Ok(SearchResults {
            query: query.to_string(),
            title,
            filters,
            books,
            summary,
        })
    }
}
