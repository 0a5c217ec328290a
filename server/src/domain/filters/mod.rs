//! Structured book filters
//!
//! Model output arrives as loosely typed clauses (`RawClause`). `FilterSet::from_raw`
//! validates them against the book schema and `FilterSet::to_query` turns the
//! result into a table query.
//!
//! ```
//! use bookshelf_server::domain::filters::{FilterSet, RawClause};
//!
//! let raw: Vec<RawClause> = serde_json::from_str(
//!     r#"[{"column": "price", "operator": "lt", "value": "500"}]"#,
//! )
//! .unwrap();
//! let filters = FilterSet::from_raw(raw).unwrap();
//! assert_eq!(filters.to_query().to_pairs()[1], ("price", "lt.500"));
//! ```

mod apply;
mod coerce;
mod parser;
mod types;

pub use coerce::coerce_value;
pub use types::{
    FilterClause, FilterOp, FilterSet, FilterValue, RawClause, SkippedClause, UnknownColumn,
};
