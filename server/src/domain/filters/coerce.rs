use crate::data::books::BookColumn;

use super::types::FilterValue;

/// Turn numeric-looking text into a number for numeric columns.
///
/// Text containing `.` is read as a float, anything else as an integer.
/// Text that does not parse is kept unchanged.
pub fn coerce_value(column: BookColumn, value: FilterValue) -> FilterValue {
    if !column.is_numeric() {
        return value;
    }
    let FilterValue::Text(text) = value else {
        return value;
    };

    let trimmed = text.trim();
    let parsed = if trimmed.contains('.') {
        trimmed.parse::<f64>().ok().map(FilterValue::Float)
    } else {
        trimmed.parse::<i64>().ok().map(FilterValue::Integer)
    };
    parsed.unwrap_or(FilterValue::Text(text))
}
