//! Terminal rendering of search results

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, Table};

use super::constants::EXAMPLE_QUERIES;
use crate::domain::{BookSummary, QuickFilter, SearchResults};

pub const NO_BOOKS_FOUND: &str = "No books found.";

/// Title, metrics and book table; a single notice when nothing matched
pub fn render_results(results: &SearchResults) -> String {
    if results.books.is_empty() {
        return NO_BOOKS_FOUND.to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec!["ID", "Title", "Stock", "Price"]);
    for book in &results.books {
        table.add_row(vec![
            Cell::new(book.id).set_alignment(CellAlignment::Right),
            Cell::new(&book.title),
            Cell::new(book.stock).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", book.price)).set_alignment(CellAlignment::Right),
        ]);
    }

    format!(
        "{}\n{}\n{}",
        results.title,
        render_summary(&results.summary),
        table
    )
}

pub fn render_summary(summary: &BookSummary) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_header(vec![
            "Total Books",
            "Average Price",
            "Total Stock",
            "Low Stock Books",
        ])
        .add_row(vec![
            summary.total_books.to_string(),
            format!("{:.2}", summary.average_price),
            summary.total_stock.to_string(),
            summary.low_stock_books.to_string(),
        ]);
    table.to_string()
}

/// Shell greeting: example queries and commands
pub fn render_help() -> String {
    let mut out = String::from("Example queries:\n");
    for example in EXAMPLE_QUERIES {
        out.push_str(&format!("  - {}\n", example));
    }
    out.push_str("\nQuick filters:\n");
    for filter in QuickFilter::ALL {
        out.push_str(&format!("  :quick {:<10} {}\n", filter.name(), filter.title()));
    }
    out.push_str("\nCommands: :help, :quit\n");
    out
}
