//! In-process book store evaluating PostgREST predicates over fixed rows

use async_trait::async_trait;

use super::client::BookStore;
use super::error::TableError;
use super::query::TableQuery;
use super::types::BookRecord;

#[derive(Debug, Default)]
pub struct MemoryBookStore {
    rows: Vec<BookRecord>,
    queries: std::sync::Mutex<Vec<TableQuery>>,
}

impl MemoryBookStore {
    pub fn new(rows: Vec<BookRecord>) -> Self {
        Self {
            rows,
            queries: Default::default(),
        }
    }

    /// Queries received so far
    pub fn queries(&self) -> Vec<TableQuery> {
        self.queries.lock().unwrap().clone()
    }

    fn matches(row: &BookRecord, column: &str, filter: &str) -> Result<bool, TableError> {
        let (op, value) = filter
            .split_once('.')
            .ok_or_else(|| TableError::Decode(format!("malformed filter {}", filter)))?;

        let field = match column {
            "id" => Field::Number(row.id as f64),
            "stock" => Field::Number(row.stock as f64),
            "price" => Field::Number(row.price),
            "title" => Field::Text(&row.title),
            other => {
                return Err(TableError::Status {
                    status: 400,
                    body: format!("column BOOK.{} does not exist", other),
                });
            }
        };

        let ordering = match (&field, op) {
            (_, "like") => return Ok(like_match(&field.to_text(), value)),
            (_, "ilike") => {
                return Ok(like_match(
                    &field.to_text().to_lowercase(),
                    &value.to_lowercase(),
                ));
            }
            (Field::Number(n), _) => {
                let v: f64 = value.parse().map_err(|_| TableError::Status {
                    status: 400,
                    body: format!("invalid input syntax for type numeric: \"{}\"", value),
                })?;
                n.partial_cmp(&v)
            }
            (Field::Text(t), _) => Some((*t).cmp(value)),
        };

        use std::cmp::Ordering::*;
        Ok(match op {
            "eq" => ordering == Some(Equal),
            "neq" => ordering != Some(Equal),
            "gt" => ordering == Some(Greater),
            "gte" => matches!(ordering, Some(Greater | Equal)),
            "lt" => ordering == Some(Less),
            "lte" => matches!(ordering, Some(Less | Equal)),
            other => {
                return Err(TableError::Status {
                    status: 400,
                    body: format!("unknown operator {}", other),
                });
            }
        })
    }
}

enum Field<'a> {
    Number(f64),
    Text(&'a str),
}

impl Field<'_> {
    fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(t) => t.to_string(),
        }
    }
}

/// SQL LIKE: `%` any run, `_` one char, `\` escapes the next char
fn like_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        tokens.push(match c {
            '\\' => Token::Literal(chars.next().unwrap_or('\\')),
            '%' => Token::Any,
            '_' => Token::One,
            c => Token::Literal(c),
        });
    }

    // reachable[j]: text[..j] matches the tokens consumed so far
    let mut reachable = vec![false; text.len() + 1];
    reachable[0] = true;
    for token in &tokens {
        let mut next = vec![false; text.len() + 1];
        for j in 0..=text.len() {
            match token {
                Token::Any => next[j] = reachable[j] || (j > 0 && next[j - 1]),
                Token::One => next[j] = j > 0 && reachable[j - 1],
                Token::Literal(c) => next[j] = j > 0 && reachable[j - 1] && text[j - 1] == *c,
            }
        }
        reachable = next;
    }
    reachable[text.len()]
}

enum Token {
    Any,
    One,
    Literal(char),
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn fetch(&self, query: &TableQuery) -> Result<Vec<BookRecord>, TableError> {
        self.queries.lock().unwrap().push(query.clone());

        let mut rows = Vec::new();
        'rows: for row in &self.rows {
            for (column, filter) in query.predicates() {
                if !Self::matches(row, column, filter)? {
                    continue 'rows;
                }
            }
            rows.push(row.clone());
        }
        Ok(rows)
    }

    fn table(&self) -> &str {
        "BOOK"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_match() {
        assert!(like_match("Harry Potter", "%Potter%"));
        assert!(like_match("Harry Potter", "Harry%"));
        assert!(!like_match("Harry Potter", "%potter%"));
        assert!(like_match("abc", "a_c"));
        assert!(!like_match("abc", "a_"));
        assert!(like_match("100%", "%100\\%%"));
        assert!(!like_match("1000", "%100\\%%"));
        assert!(like_match("", "%%"));
    }

    #[tokio::test]
    async fn test_fetch_applies_every_predicate() {
        let store = MemoryBookStore::new(vec![
            BookRecord::new(1, "Dune", 4, 450.0),
            BookRecord::new(2, "Emma", 12, 120.5),
            BookRecord::new(3, "Ulysses", 2, 1500.0),
        ]);

        let rows = store
            .fetch(&TableQuery::default().lt("price", 500).gte("stock", 10))
            .await
            .unwrap();
        assert_eq!(rows, vec![BookRecord::new(2, "Emma", 12, 120.5)]);
        assert_eq!(store.queries().len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_column_is_an_error() {
        let store = MemoryBookStore::new(vec![BookRecord::new(1, "Dune", 4, 450.0)]);
        let err = store
            .fetch(&TableQuery::default().eq("author", "Herbert"))
            .await
            .unwrap_err();
        assert!(matches!(err, TableError::Status { status: 400, .. }));
    }
}
