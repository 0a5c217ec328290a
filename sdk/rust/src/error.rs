use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Completion endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response contained no message content")]
    EmptyResponse,

    #[error("Completion client configuration error: {0}")]
    Config(String),
}

impl CompletionError {
    /// Whether the endpoint rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }
}
