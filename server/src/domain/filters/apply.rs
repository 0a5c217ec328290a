//! Translation of a FilterSet onto the table query builder

use super::types::{FilterOp, FilterSet};
use crate::data::books::TableQuery;
use crate::utils::sql::contains_pattern;

impl FilterSet {
    /// `select=*` plus one predicate per clause
    pub fn to_query(&self) -> TableQuery {
        self.clauses()
            .iter()
            .fold(TableQuery::default(), |query, clause| {
                let column = clause.column.as_str();
                let value = &clause.value;
                match clause.operator {
                    FilterOp::Eq => query.eq(column, value),
                    FilterOp::Gt => query.gt(column, value),
                    FilterOp::Gte => query.gte(column, value),
                    FilterOp::Lt => query.lt(column, value),
                    FilterOp::Lte => query.lte(column, value),
                    FilterOp::Neq => query.neq(column, value),
                    FilterOp::Like => query.like(column, &contains_pattern(&value.to_string())),
                    FilterOp::Ilike => query.ilike(column, &contains_pattern(&value.to_string())),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::RawClause;
    use super::*;
    use crate::data::books::{BookRecord, BookStore, MemoryBookStore};
    use serde_json::json;

    fn set(clauses: serde_json::Value) -> FilterSet {
        let raw: Vec<RawClause> = serde_json::from_value(clauses).unwrap();
        FilterSet::from_raw(raw).unwrap()
    }

    fn catalog() -> MemoryBookStore {
        MemoryBookStore::new(vec![
            BookRecord::new(1, "Harry Potter and the Philosopher's Stone", 8, 399.0),
            BookRecord::new(2, "harry potter box set", 2, 2499.0),
            BookRecord::new(3, "Dune", 4, 450.0),
            BookRecord::new(4, "War and Peace", 15, 1200.0),
            BookRecord::new(5, "HARRY POTTER Y LA PIEDRA FILOSOFAL", 1, 500.0),
        ])
    }

    #[test]
    fn test_empty_set_selects_all() {
        assert_eq!(FilterSet::default().to_query(), TableQuery::default());
    }

    #[test]
    fn test_pairs_for_each_operator() {
        let query = set(json!([
            {"column": "price", "operator": "lt", "value": 500},
            {"column": "stock", "operator": "neq", "value": "0"},
            {"column": "title", "operator": "like", "value": "Dune"},
            {"column": "price", "operator": "gte", "value": "19.99"}
        ]))
        .to_query();
        assert_eq!(
            query.to_pairs(),
            vec![
                ("select", "*"),
                ("price", "lt.500"),
                ("stock", "neq.0"),
                ("title", "like.%Dune%"),
                ("price", "gte.19.99"),
            ]
        );
    }

    #[test]
    fn test_like_value_is_escaped() {
        let query = set(json!([{"column": "title", "operator": "ilike", "value": "100%_"}])).to_query();
        assert_eq!(query.predicates()[0].1, "ilike.%100\\%\\_%");
    }

    #[tokio::test]
    async fn test_price_lt_500_returns_only_cheaper_rows() {
        let store = catalog();
        let query = set(json!([{"column": "price", "operator": "lt", "value": 500}])).to_query();
        let rows = store.fetch(&query).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|b| b.price < 500.0));
    }

    #[tokio::test]
    async fn test_ilike_matches_regardless_of_case() {
        let store = catalog();
        let query = set(json!([
            {"column": "title", "operator": "ilike", "value": "Harry Potter"}
        ]))
        .to_query();
        let ids: Vec<i64> = store.fetch(&query).await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);
    }

    #[tokio::test]
    async fn test_like_is_case_sensitive() {
        let store = catalog();
        let query = set(json!([
            {"column": "title", "operator": "like", "value": "Harry Potter"}
        ]))
        .to_query();
        let ids: Vec<i64> = store.fetch(&query).await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[tokio::test]
    async fn test_clauses_combine_with_and() {
        let store = catalog();
        let query = set(json!([
            {"column": "price", "operator": "gte", "value": 400},
            {"column": "stock", "operator": "lt", "value": "5"}
        ]))
        .to_query();
        let ids: Vec<i64> = store.fetch(&query).await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 3, 5]);
    }
}
