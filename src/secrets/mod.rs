use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::config::{SecretsBackend, SecretsConfig};

/// Key of the HMAC secret used to sign and verify access tokens
pub const JWT_SIGNING_ACCESS_TOKEN: &str = "JWT_SIGNING_ACCESS_TOKEN";

/// Key of the Postgres connection string when it is not configured directly
pub const POSTGRES_URL: &str = "POSTGRES_URL";

#[derive(Debug, Error)]
pub enum SecretsError {
    #[error("secret {0} not found")]
    NotFound(String),

    #[error("secrets file {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("secrets file {path} is malformed: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Source of secret values. Implementations are queried on every use and must not cache.
#[async_trait]
pub trait SecretsProvider: Send + Sync {
    async fn get(&self, key: &str) -> Result<String, SecretsError>;
}

/// Provider selected by configuration
pub fn from_config(config: &SecretsConfig) -> Arc<dyn SecretsProvider> {
    match config.backend {
        SecretsBackend::Env => Arc::new(EnvSecretsProvider),
        SecretsBackend::File => Arc::new(FileSecretsProvider::new(&config.file)),
    }
}

/// Reads secrets from the process environment
#[derive(Debug, Default, Clone)]
pub struct EnvSecretsProvider;

#[async_trait]
impl SecretsProvider for EnvSecretsProvider {
    async fn get(&self, key: &str) -> Result<String, SecretsError> {
        std::env::var(key).map_err(|_| SecretsError::NotFound(key.to_string()))
    }
}

/// Reads secrets from a `KEY=VALUE` file. The file is re-read on every lookup so
/// edits take effect without a restart.
#[derive(Debug, Clone)]
pub struct FileSecretsProvider {
    path: PathBuf,
}

impl FileSecretsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SecretsProvider for FileSecretsProvider {
    async fn get(&self, key: &str) -> Result<String, SecretsError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SecretsError::Io {
                path: self.path.clone(),
                source,
            })?;

        for item in dotenvy::from_read_iter(contents.as_bytes()) {
            let (name, value) = item.map_err(|e| SecretsError::Malformed {
                path: self.path.clone(),
                message: e.to_string(),
            })?;
            if name == key {
                return Ok(value);
            }
        }

        Err(SecretsError::NotFound(key.to_string()))
    }
}

/// Mutable in-process secrets, for tests and local tooling
#[derive(Debug, Default)]
pub struct InMemorySecretsProvider {
    secrets: RwLock<HashMap<String, String>>,
}

impl InMemorySecretsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_secret(key: &str, value: &str) -> Self {
        let mut secrets = HashMap::new();
        secrets.insert(key.to_string(), value.to_string());
        Self {
            secrets: RwLock::new(secrets),
        }
    }

    pub async fn set(&self, key: &str, value: &str) {
        self.secrets
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl SecretsProvider for InMemorySecretsProvider {
    async fn get(&self, key: &str) -> Result<String, SecretsError> {
        self.secrets
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or_else(|| SecretsError::NotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_secrets_file(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("hotel-secrets-{}.env", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[tokio::test]
    async fn file_provider_reads_key() {
        let path = temp_secrets_file(
            "POSTGRES_URL=postgres://localhost/hotel\nJWT_SIGNING_ACCESS_TOKEN=abc123\n",
        );
        let provider = FileSecretsProvider::new(&path);

        assert_eq!(provider.get(JWT_SIGNING_ACCESS_TOKEN).await.unwrap(), "abc123");
        assert_eq!(provider.get(POSTGRES_URL).await.unwrap(), "postgres://localhost/hotel");
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn file_provider_keeps_equals_in_values() {
        let path = temp_secrets_file("TOKEN=a=b=c\n");
        let provider = FileSecretsProvider::new(&path);

        assert_eq!(provider.get("TOKEN").await.unwrap(), "a=b=c");
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn file_provider_sees_edits() {
        let path = temp_secrets_file("TOKEN=first\n");
        let provider = FileSecretsProvider::new(&path);
        assert_eq!(provider.get("TOKEN").await.unwrap(), "first");

        std::fs::write(&path, "TOKEN=second\n").unwrap();
        assert_eq!(provider.get("TOKEN").await.unwrap(), "second");
        std::fs::remove_file(path).ok();
    }

    #[tokio::test]
    async fn file_provider_missing_key_and_file() {
        let path = temp_secrets_file("OTHER=1\n");
        let provider = FileSecretsProvider::new(&path);
        assert!(matches!(
            provider.get("TOKEN").await,
            Err(SecretsError::NotFound(k)) if k == "TOKEN"
        ));
        std::fs::remove_file(&path).ok();

        assert!(matches!(provider.get("TOKEN").await, Err(SecretsError::Io { .. })));
    }

    #[tokio::test]
    async fn in_memory_provider_rotates() {
        let provider = InMemorySecretsProvider::with_secret(JWT_SIGNING_ACCESS_TOKEN, "one");
        assert_eq!(provider.get(JWT_SIGNING_ACCESS_TOKEN).await.unwrap(), "one");

        provider.set(JWT_SIGNING_ACCESS_TOKEN, "two").await;
        assert_eq!(provider.get(JWT_SIGNING_ACCESS_TOKEN).await.unwrap(), "two");
        assert!(provider.get("MISSING").await.is_err());
    }
}
