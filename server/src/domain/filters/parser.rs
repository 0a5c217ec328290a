//! Validation of model-emitted clauses

use super::coerce::coerce_value;
use super::types::{
    FilterClause, FilterOp, FilterSet, FilterValue, RawClause, SkippedClause, UnknownColumn,
};
use crate::data::books::BookColumn;

impl FilterSet {
    /// Validate raw clauses in order.
    ///
    /// Clauses with an unknown operator are dropped and logged; the rest are
    /// kept with numeric text coerced for numeric columns. An unknown column
    /// fails the whole set.
    pub fn from_raw(raw: Vec<RawClause>) -> Result<Self, UnknownColumn> {
        let mut clauses = Vec::with_capacity(raw.len());
        let mut skipped = Vec::new();

        for clause in raw {
            let Ok(operator) = clause.operator.parse::<FilterOp>() else {
                tracing::warn!(
                    column = %clause.column,
                    operator = %clause.operator,
                    "Unsupported operator, skipping filter"
                );
                skipped.push(SkippedClause { raw: clause });
                continue;
            };
            let column = clause
                .column
                .parse::<BookColumn>()
                .map_err(|_| UnknownColumn {
                    column: clause.column.clone(),
                })?;

            let value = coerce_value(column, FilterValue::from(clause.value));
            clauses.push(FilterClause {
                column,
                operator,
                value,
            });
        }

        Ok(Self::new(clauses, skipped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(column: &str, operator: &str, value: serde_json::Value) -> RawClause {
        RawClause {
            column: column.to_string(),
            operator: operator.to_string(),
            value,
        }
    }

    #[test]
    fn test_valid_clauses_kept_in_order() {
        let set = FilterSet::from_raw(vec![
            raw("price", "lt", json!(500)),
            raw("title", "ilike", json!("Harry Potter")),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.clauses()[0].column, BookColumn::Price);
        assert_eq!(set.clauses()[0].value, FilterValue::Integer(500));
        assert_eq!(set.clauses()[1].operator, FilterOp::Ilike);
        assert!(set.skipped().is_empty());
    }

    #[test]
    fn test_unknown_operator_dropped_others_kept() {
        let set = FilterSet::from_raw(vec![
            raw("price", "between", json!("100-200")),
            raw("stock", "gt", json!(10)),
        ])
        .unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.clauses()[0].column, BookColumn::Stock);
        assert_eq!(set.skipped().len(), 1);
        assert_eq!(set.skipped()[0].raw.operator, "between");
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let err = FilterSet::from_raw(vec![
            raw("price", "gte", json!("19.99")),
            raw("author", "eq", json!("Herbert")),
        ])
        .unwrap_err();
        assert_eq!(err.column, "author");
    }

    #[test]
    fn test_unknown_column_with_unknown_operator_is_skipped() {
        let set = FilterSet::from_raw(vec![raw("author", "between", json!("a-m"))]).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.skipped().len(), 1);
    }

    #[test]
    fn test_textual_price_coerced() {
        let set = FilterSet::from_raw(vec![raw("price", "eq", json!("1000"))]).unwrap();
        assert_eq!(set.clauses()[0].value, FilterValue::Integer(1000));
    }

    #[test]
    fn test_empty_input() {
        let set = FilterSet::from_raw(Vec::new()).unwrap();
        assert!(set.is_empty());
        assert!(set.skipped().is_empty());
    }
}
