//! Test doubles for the search pipeline

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bookshelf_sdk::{ChatCompletion, ChatRequest, CompletionError};

use super::search::BookSearchService;
use crate::core::config::CompletionConfig;
use crate::data::books::{BookRecord, MemoryBookStore};

#[derive(Debug)]
enum Reply {
    Text(String),
    Status(u16),
}

/// Completion model returning a fixed reply and recording requests
#[derive(Debug)]
pub struct StubCompletion {
    reply: Reply,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Reply::Text(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            reply: Reply::Status(status),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for StubCompletion {
    async fn complete(&self, request: &ChatRequest) -> Result<String, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Status(status) => Err(CompletionError::Status {
                status: *status,
                body: "stubbed failure".to_string(),
            }),
        }
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

pub fn completion_config() -> CompletionConfig {
    CompletionConfig {
        base_url: "http://localhost/v1".to_string(),
        model: "openai/gpt-3.5-turbo".to_string(),
        temperature: 0.1,
        timeout_secs: 5,
        json_mode: false,
    }
}

pub fn sample_books() -> Vec<BookRecord> {
    vec![
        BookRecord::new(1, "Harry Potter and the Philosopher's Stone", 8, 399.0),
        BookRecord::new(2, "The Hobbit", 2, 1250.0),
        BookRecord::new(3, "Dune", 4, 450.0),
        BookRecord::new(4, "War and Peace", 15, 1000.0),
        BookRecord::new(5, "Clean Code", 25, 1899.99),
        BookRecord::new(6, "Emma", 12, 120.5),
    ]
}

pub fn service_with(
    completion: StubCompletion,
    books: Vec<BookRecord>,
) -> (BookSearchService, Arc<StubCompletion>, Arc<MemoryBookStore>) {
    let completion = Arc::new(completion);
    let store = Arc::new(MemoryBookStore::new(books));
    let service = BookSearchService::new(completion.clone(), store.clone(), &completion_config());
    (service, completion, store)
}
