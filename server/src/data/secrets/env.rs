use async_trait::async_trait;

use super::error::SecretError;
use super::provider::SecretProvider;
use super::types::Secret;

#[derive(Debug)]
pub struct EnvProvider {
    prefix: String,
}

impl EnvProvider {
    pub fn new(prefix: String) -> Self {
        Self { prefix }
    }

    pub fn env_var_for(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name.to_uppercase().replace('-', "_"))
    }
}

#[async_trait]
impl SecretProvider for EnvProvider {
    async fn get(&self, name: &str) -> Result<Option<Secret>, SecretError> {
        let var = self.env_var_for(name);
        match std::env::var(&var) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(Secret::new(value.trim()))),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(SecretError::backend(
                "env",
                format!("failed to read {}: {}", var, e),
            )),
        }
    }

    async fn set(&self, _name: &str, _secret: &Secret) -> Result<(), SecretError> {
        Err(SecretError::ReadOnly { backend: "env" })
    }

    fn name(&self) -> &'static str {
        "environment"
    }

    fn is_read_only(&self) -> bool {
        true
    }
}
