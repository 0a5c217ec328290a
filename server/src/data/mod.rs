//! Data access layer
//!
//! - `books` - the remote book table (PostgREST client, query builder)
//! - `secrets` - API keys from the local secret store or the environment

pub mod books;
pub mod secrets;
