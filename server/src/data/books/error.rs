use thiserror::Error;

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Table service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Table service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode table rows: {0}")]
    Decode(String),

    #[error("Table client configuration error: {0}")]
    Config(String),
}
