//! System prompt for filter translation

use std::fmt::Write;

use crate::data::books::BookColumn;
use crate::domain::filters::FilterOp;

const EXAMPLES: &[(&str, &str)] = &[
    (
        "books with price 1000",
        r#"{"filters": [{"column": "price", "operator": "eq", "value": 1000}]}"#,
    ),
    (
        "books cheaper than 500",
        r#"{"filters": [{"column": "price", "operator": "lt", "value": 500}]}"#,
    ),
    (
        "books with stock more than 10",
        r#"{"filters": [{"column": "stock", "operator": "gt", "value": 10}]}"#,
    ),
];

/// Schema, operators, output shape and few-shot examples for `table`
pub fn system_prompt(table: &str) -> String {
    let mut prompt = String::from(
        "You are a database query assistant. Based on the user's request, \
         generate a JSON object with filter criteria for a table query.\n\n",
    );

    let _ = writeln!(prompt, "Table: {}", table);
    prompt.push_str("Columns:\n");
    for column in BookColumn::ALL {
        let _ = writeln!(
            prompt,
            "- {}: {} ({})",
            column,
            column.sql_type(),
            column.description()
        );
    }

    prompt.push_str("\nAvailable filter operators:\n");
    for op in FilterOp::ALL {
        let _ = writeln!(prompt, "- {}: {}", op, op.description());
    }

    prompt.push_str(
        "\nReturn ONLY a JSON object with this structure:\n\
         {\"filters\": [{\"column\": \"column_name\", \"operator\": \"operator\", \"value\": \"value\"}]}\n\
         All filters are combined with AND. Return {\"filters\": []} to match every book.\n\nExamples:\n",
    );
    for (question, answer) in EXAMPLES {
        let _ = writeln!(prompt, "- \"{}\" -> {}", question, answer);
    }

    prompt
}
