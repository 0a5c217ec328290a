//! Columns of the book table

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookColumn {
    Id,
    Title,
    Stock,
    Price,
}

impl BookColumn {
    pub const ALL: [BookColumn; 4] = [Self::Id, Self::Title, Self::Stock, Self::Price];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Stock => "stock",
            Self::Price => "price",
        }
    }

    pub fn sql_type(&self) -> &'static str {
        match self {
            Self::Id | Self::Stock => "integer",
            Self::Title => "text",
            Self::Price => "numeric",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Id => "unique identifier of the book",
            Self::Title => "title of the book",
            Self::Stock => "number of copies in stock",
            Self::Price => "price of the book",
        }
    }

    /// Columns whose textual filter values are coerced to numbers
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Stock | Self::Price)
    }
}

impl fmt::Display for BookColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown column: {}", s))
    }
}
