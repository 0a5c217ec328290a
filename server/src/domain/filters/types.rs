//! Filter type definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::books::BookColumn;

/// Comparison operators understood by the table service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
    Neq,
    Like,
    Ilike,
}

impl FilterOp {
    pub const ALL: [FilterOp; 8] = [
        Self::Eq,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
        Self::Neq,
        Self::Like,
        Self::Ilike,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Neq => "neq",
            Self::Like => "like",
            Self::Ilike => "ilike",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Eq => "equals",
            Self::Gt => "greater than",
            Self::Gte => "greater than or equal to",
            Self::Lt => "less than",
            Self::Lte => "less than or equal to",
            Self::Neq => "not equal to",
            Self::Like => "contains text (case-sensitive)",
            Self::Ilike => "contains text (case-insensitive)",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operator: {}", s))
    }
}

/// Value side of a clause, as the model emitted it (after coercion)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Integer(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Null,
}

impl From<serde_json::Value> for FilterValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Self::Text(s),
            other @ (Value::Array(_) | Value::Object(_)) => Self::Text(other.to_string()),
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{}", i),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Null => f.write_str("null"),
        }
    }
}

/// One `column operator value` condition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterClause {
    pub column: BookColumn,
    pub operator: FilterOp,
    pub value: FilterValue,
}

/// Clause as it appears in the model's JSON, before validation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawClause {
    pub column: String,
    pub operator: String,
    pub value: serde_json::Value,
}

/// Clause with an unsupported operator; logged, never shown to users
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedClause {
    pub raw: RawClause,
}

/// Clause naming a column the table does not have
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown column '{column}'")]
pub struct UnknownColumn {
    pub column: String,
}

/// Ordered AND-combination of clauses for one query
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterSet {
    clauses: Vec<FilterClause>,
    #[serde(skip)]
    skipped: Vec<SkippedClause>,
}

impl FilterSet {
    pub(super) fn new(clauses: Vec<FilterClause>, skipped: Vec<SkippedClause>) -> Self {
        Self { clauses, skipped }
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn skipped(&self) -> &[SkippedClause] {
        &self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_operator_parse_is_exact() {
        for op in FilterOp::ALL {
            assert_eq!(op.as_str().parse::<FilterOp>().unwrap(), op);
        }
        assert!("EQ".parse::<FilterOp>().is_err());
        assert!("between".parse::<FilterOp>().is_err());
    }

    #[test]
    fn test_value_from_json() {
        assert_eq!(FilterValue::from(json!(500)), FilterValue::Integer(500));
        assert_eq!(FilterValue::from(json!(19.99)), FilterValue::Float(19.99));
        assert_eq!(
            FilterValue::from(json!("Dune")),
            FilterValue::Text("Dune".into())
        );
        assert_eq!(FilterValue::from(json!(true)), FilterValue::Bool(true));
        assert_eq!(FilterValue::from(json!(null)), FilterValue::Null);
        assert_eq!(
            FilterValue::from(json!([1, 2])),
            FilterValue::Text("[1,2]".into())
        );
    }

    #[test]
    fn test_value_display() {
        assert_eq!(FilterValue::Integer(1000).to_string(), "1000");
        assert_eq!(FilterValue::Float(19.99).to_string(), "19.99");
        assert_eq!(FilterValue::Text("a b".into()).to_string(), "a b");
        assert_eq!(FilterValue::Null.to_string(), "null");
    }

    #[test]
    fn test_unknown_column_message() {
        let err = UnknownColumn {
            column: "author".into(),
        };
        assert_eq!(err.to_string(), "unknown column 'author'");
    }

    #[test]
    fn test_filter_set_serializes_clauses_only() {
        let set = FilterSet::new(
            vec![FilterClause {
                column: BookColumn::Price,
                operator: FilterOp::Lt,
                value: FilterValue::Integer(500),
            }],
            vec![SkippedClause {
                raw: RawClause {
                    column: "price".into(),
                    operator: "between".into(),
                    value: json!(1),
                },
            }],
        );
        assert_eq!(
            serde_json::to_value(&set).unwrap(),
            json!([{"column": "price", "operator": "lt", "value": 500}])
        );
    }
}
