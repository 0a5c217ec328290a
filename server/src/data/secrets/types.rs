use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
pub struct Secret {
    pub value: String,
    pub metadata: SecretMetadata,
}

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            value: value.into(),
            metadata: SecretMetadata {
                created_at: now,
                updated_at: now,
            },
        }
    }
}

// Never print secret values
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secret")
            .field("value", &"[REDACTED]")
            .field("metadata", &self.metadata)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Where a required secret was found, if anywhere
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretStatus {
    pub name: String,
    pub source: Option<&'static str>,
}

impl SecretStatus {
    pub fn is_set(&self) -> bool {
        self.source.is_some()
    }
}

/// Resolved values for the secrets every search needs
#[derive(Clone)]
pub struct RequiredSecrets {
    pub completion_api_key: String,
    pub table_api_key: String,
}

impl fmt::Debug for RequiredSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequiredSecrets").finish_non_exhaustive()
    }
}

// -- File vault format --

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct SecretVault {
    #[serde(default)]
    pub secrets: BTreeMap<String, Secret>,
}

impl SecretVault {
    pub fn get_secret(&self, name: &str) -> Option<Secret> {
        self.secrets.get(name).cloned()
    }

    /// Insert or replace, keeping the original creation time
    pub fn set_secret(&mut self, name: &str, secret: &Secret) {
        let mut secret = secret.clone();
        if let Some(existing) = self.secrets.get(name) {
            secret.metadata.created_at = existing.metadata.created_at;
        }
        self.secrets.insert(name.to_string(), secret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_value() {
        let secret = Secret::new("sk-very-secret");
        let printed = format!("{:?}", secret);
        assert!(printed.contains("[REDACTED]"));
        assert!(!printed.contains("sk-very-secret"));

        let required = RequiredSecrets {
            completion_api_key: "sk-a".to_string(),
            table_api_key: "anon-b".to_string(),
        };
        let printed = format!("{:?}", required);
        assert!(!printed.contains("sk-a"));
        assert!(!printed.contains("anon-b"));
    }

    #[test]
    fn test_vault_set_keeps_created_at() {
        let mut vault = SecretVault::default();
        let first = Secret::new("v1");
        vault.set_secret("table_api_key", &first);

        let mut second = Secret::new("v2");
        second.metadata.created_at = first.metadata.created_at + chrono::Duration::days(1);
        vault.set_secret("table_api_key", &second);

        let stored = vault.get_secret("table_api_key").unwrap();
        assert_eq!(stored.value, "v2");
        assert_eq!(stored.metadata.created_at, first.metadata.created_at);
    }

    #[test]
    fn test_vault_deserialize_without_secrets_field() {
        let vault: SecretVault = serde_json::from_str("{}").unwrap();
        assert!(vault.secrets.is_empty());
    }
}
