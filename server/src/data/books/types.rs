use serde::{Deserialize, Serialize};

/// One row of the book table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub price: f64,
}

#[cfg(test)]
impl BookRecord {
    pub fn new(id: i64, title: &str, stock: i64, price: f64) -> Self {
        Self {
            id,
            title: title.to_string(),
            stock,
            price,
        }
    }
}
