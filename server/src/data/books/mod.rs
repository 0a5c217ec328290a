//! Remote book table: schema, rows, query builder and HTTP client

mod client;
mod error;
#[cfg(test)]
mod memory;
mod query;
mod schema;
mod types;

pub use client::{BookStore, RestTableClient};
pub use error::TableError;
#[cfg(test)]
pub use memory::MemoryBookStore;
pub use query::TableQuery;
pub use schema::BookColumn;
pub use types::BookRecord;
