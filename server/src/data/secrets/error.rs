use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Invalid secret name '{0}': use lowercase letters, digits and underscores")]
    InvalidName(String),

    #[error("Missing required secrets: {}", .0.join(", "))]
    Missing(Vec<String>),

    #[error("Secret backend error ({backend}): {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    #[error("Secret backend is read-only ({backend})")]
    ReadOnly { backend: &'static str },

    #[error("No writable secret backend configured")]
    NoWritableBackend,

    #[error("Secret serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SecretError {
    pub fn backend(backend: &'static str, msg: impl Into<String>) -> Self {
        Self::Backend {
            backend,
            message: msg.into(),
        }
    }
}
