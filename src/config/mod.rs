use serde::{Deserialize, Serialize};
use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Costs bcrypt accepts
pub const PASSWORD_HASH_COSTS: RangeInclusive<u32> = 4..=31;

/// Access token lifetimes accepted at startup, in days
pub const ACCESS_TOKEN_TTL_DAYS: RangeInclusive<i64> = 1..=3650;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub secrets: SecretsConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// When unset, the URL is read from the secrets provider (`POSTGRES_URL`)
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SecretsBackend {
    Env,
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecretsConfig {
    pub backend: SecretsBackend,
    pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub access_token_ttl_days: i64,
    pub password_hash_cost: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// Default `tracing` filter when `RUST_LOG` is not set
    pub default_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = env::var("SERVER_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout =
                v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Secrets overrides
        match env::var("SECRETS_PROVIDER").as_deref() {
            Ok("file") => self.secrets.backend = SecretsBackend::File,
            Ok("env") => self.secrets.backend = SecretsBackend::Env,
            _ => {}
        }
        if let Ok(v) = env::var("SECRETS_FILE") {
            self.secrets.file = PathBuf::from(v);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Ok(v) = env::var("SECURITY_ACCESS_TOKEN_TTL_DAYS") {
            self.security.access_token_ttl_days =
                v.parse().unwrap_or(self.security.access_token_ttl_days);
        }
        if let Ok(v) = env::var("SECURITY_PASSWORD_HASH_COST") {
            self.security.password_hash_cost =
                v.parse().unwrap_or(self.security.password_hash_cost);
        }

        // Logging overrides
        match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => self.logging.format = LogFormat::Json,
            Ok("pretty") => self.logging.format = LogFormat::Pretty,
            _ => {}
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            secrets: SecretsConfig {
                backend: SecretsBackend::File,
                file: PathBuf::from(".env"),
            },
            security: SecurityConfig {
                enable_cors: true,
                access_token_ttl_days: 30,
                password_hash_cost: 12,
            },
            logging: LoggingConfig {
                format: LogFormat::Pretty,
                default_filter: "hotel_booking_api=debug,tower_http=debug,info".to_string(),
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            secrets: SecretsConfig {
                backend: SecretsBackend::Env,
                file: PathBuf::from(".env"),
            },
            security: SecurityConfig {
                enable_cors: true,
                access_token_ttl_days: 30,
                password_hash_cost: 12,
            },
            logging: LoggingConfig {
                format: LogFormat::Json,
                default_filter: "info".to_string(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
            },
            secrets: SecretsConfig {
                backend: SecretsBackend::Env,
                file: PathBuf::from(".env"),
            },
            security: SecurityConfig {
                enable_cors: false,
                access_token_ttl_days: 30,
                password_hash_cost: 12,
            },
            logging: LoggingConfig {
                format: LogFormat::Json,
                default_filter: "warn,hotel_booking_api=info".to_string(),
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.secrets.backend, SecretsBackend::File);
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert_eq!(config.security.access_token_ttl_days, 30);
        assert_eq!(config.security.password_hash_cost, 12);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert_eq!(config.secrets.backend, SecretsBackend::Env);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(!config.security.enable_cors);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }
}
