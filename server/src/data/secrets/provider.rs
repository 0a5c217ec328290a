use async_trait::async_trait;

use super::error::SecretError;
use super::types::Secret;

#[async_trait]
pub trait SecretProvider: Send + Sync + std::fmt::Debug {
    /// Retrieve a secret by name
    async fn get(&self, name: &str) -> Result<Option<Secret>, SecretError>;

    /// Store a secret
    async fn set(&self, name: &str, secret: &Secret) -> Result<(), SecretError>;

    /// Human-readable backend name
    fn name(&self) -> &'static str;

    /// Whether backend is read-only (env provider)
    fn is_read_only(&self) -> bool {
        false
    }
}
