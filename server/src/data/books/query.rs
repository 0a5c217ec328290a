//! PostgREST query builder
//!
//! Collects `select` plus one `column=op.value` pair per predicate. Pairs
//! are combined with AND by the table service.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    select: String,
    predicates: Vec<(String, String)>,
}

impl Default for TableQuery {
    fn default() -> Self {
        Self::select("*")
    }
}

impl TableQuery {
    pub fn select(columns: impl Into<String>) -> Self {
        Self {
            select: columns.into(),
            predicates: Vec::new(),
        }
    }

    fn push(mut self, column: &str, op: &str, value: impl Display) -> Self {
        self.predicates
            .push((column.to_string(), format!("{}.{}", op, value)));
        self
    }

    pub fn eq(self, column: &str, value: impl Display) -> Self {
        self.push(column, "eq", value)
    }

    pub fn neq(self, column: &str, value: impl Display) -> Self {
        self.push(column, "neq", value)
    }

    pub fn gt(self, column: &str, value: impl Display) -> Self {
        self.push(column, "gt", value)
    }

    pub fn gte(self, column: &str, value: impl Display) -> Self {
        self.push(column, "gte", value)
    }

    pub fn lt(self, column: &str, value: impl Display) -> Self {
        self.push(column, "lt", value)
    }

    pub fn lte(self, column: &str, value: impl Display) -> Self {
        self.push(column, "lte", value)
    }

    /// Case-sensitive pattern match (`%` and `_` wildcards)
    pub fn like(self, column: &str, pattern: &str) -> Self {
        self.push(column, "like", pattern)
    }

    /// Case-insensitive pattern match
    pub fn ilike(self, column: &str, pattern: &str) -> Self {
        self.push(column, "ilike", pattern)
    }

    pub fn predicates(&self) -> &[(String, String)] {
        &self.predicates
    }

    /// Query-string pairs, `select` first
    pub fn to_pairs(&self) -> Vec<(&str, &str)> {
        std::iter::once(("select", self.select.as_str()))
            .chain(
                self.predicates
                    .iter()
                    .map(|(column, filter)| (column.as_str(), filter.as_str())),
            )
            .collect()
    }
}
