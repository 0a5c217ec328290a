//! Bookshelf: natural-language search over a remote book table.
//!
//! A completion model turns a question into structured filters, which are
//! sent as a PostgREST query to the table service. Results come back with
//! summary metrics for the CLI, the interactive shell and the JSON API.

pub mod api;
pub mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
