use serde::Serialize;

use crate::core::constants::LOW_STOCK_THRESHOLD;
use crate::data::books::BookRecord;

/// Headline numbers shown above a result table
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookSummary {
    pub total_books: usize,
    pub average_price: f64,
    pub total_stock: i64,
    pub low_stock_books: usize,
}

impl BookSummary {
    pub fn from_books(books: &[BookRecord]) -> Self {
        if books.is_empty() {
            return Self::default();
        }

        let total_price: f64 = books.iter().map(|b| b.price).sum();
        Self {
            total_books: books.len(),
            average_price: total_price / books.len() as f64,
            total_stock: books.iter().map(|b| b.stock).sum(),
            low_stock_books: books
                .iter()
                .filter(|b| b.stock < LOW_STOCK_THRESHOLD)
                .count(),
        }
    }
}
