//! API route handlers

pub mod books;
pub mod health;
