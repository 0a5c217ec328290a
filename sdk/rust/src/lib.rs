//! # Bookshelf SDK
//!
//! Minimal client for OpenAI-compatible chat-completion endpoints
//! (OpenRouter, OpenAI, local gateways). Bookshelf uses it to ask a hosted
//! model to translate a book question into structured table filters.
//!
//! ```no_run
//! use bookshelf_sdk::{ChatCompletion, ChatMessage, ChatRequest, OpenAiClient};
//!
//! # async fn demo() -> Result<(), bookshelf_sdk::CompletionError> {
//! let client = OpenAiClient::builder("https://openrouter.ai/api/v1", "sk-...").build()?;
//! let request = ChatRequest::new("openai/gpt-3.5-turbo")
//!     .message(ChatMessage::system("Answer with JSON."))
//!     .message(ChatMessage::user("books cheaper than 500"))
//!     .temperature(0.1);
//! let text = client.complete(&request).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use client::{ChatCompletion, OpenAiClient, OpenAiClientBuilder};
pub use error::CompletionError;
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, Choice, ChoiceMessage, ResponseFormat, Role, Usage,
};
