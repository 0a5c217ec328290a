//! Book search domain
//!
//! - `filters` - validated filter clauses and their table query form
//! - `intent` - natural language to filters through a completion model
//! - `search` - the end-to-end search pipeline and quick filters
//! - `summary` - result metrics

pub mod filters;
pub mod intent;
pub mod search;
pub mod summary;
#[cfg(test)]
pub(crate) mod testing;

pub use filters::FilterSet;
pub use intent::{IntentTranslator, TranslateError};
pub use search::{BookSearchService, QuickFilter, SearchError, SearchResults};
pub use summary::BookSummary;
