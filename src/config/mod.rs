use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Signing key used when running in development without `SECRET_KEY`.
const DEVELOPMENT_SECRET_KEY: &str = "customer-api-development-secret";

const MAX_TOKEN_EXPIRY_HOURS: u64 = 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("SECRET_KEY must be set in {0:?} mode")]
    MissingSecret(Environment),

    #[error("SECRET_KEY must not be empty")]
    EmptySecret,

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub bind: String,
    pub port: u16,
    pub max_request_size_bytes: usize,
    pub default_per_page: u32,
    pub max_per_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub secret_key: String,
    pub token_expiry_hours: u64,
    pub bcrypt_cost: u32,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let preset = match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        };

        let config = preset.with_overrides(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Database overrides
        if let Some(v) = lookup("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse("DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = parse("DATABASE_CONNECTION_TIMEOUT", &v)?;
        }

        // API overrides
        if let Some(v) = lookup("API_BIND") {
            self.api.bind = v;
        }
        if let Some(v) = lookup("API_PORT").or_else(|| lookup("PORT")) {
            self.api.port = parse("API_PORT", &v)?;
        }
        if let Some(v) = lookup("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes = parse("API_MAX_REQUEST_SIZE_BYTES", &v)?;
        }
        if let Some(v) = lookup("API_DEFAULT_PER_PAGE") {
            self.api.default_per_page = parse("API_DEFAULT_PER_PAGE", &v)?;
        }
        if let Some(v) = lookup("API_MAX_PER_PAGE") {
            self.api.max_per_page = parse("API_MAX_PER_PAGE", &v)?;
        }

        // Security overrides
        if let Some(v) = lookup("SECRET_KEY") {
            self.security.secret_key = v;
        } else if self.environment != Environment::Development {
            return Err(ConfigError::MissingSecret(self.environment));
        } else {
            tracing::warn!("SECRET_KEY not set, using the development signing key");
        }
        if let Some(v) = lookup("SECURITY_TOKEN_EXPIRY_HOURS") {
            self.security.token_expiry_hours = parse("SECURITY_TOKEN_EXPIRY_HOURS", &v)?;
        }
        if let Some(v) = lookup("SECURITY_BCRYPT_COST") {
            self.security.bcrypt_cost = parse("SECURITY_BCRYPT_COST", &v)?;
        }
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = parse("SECURITY_ENABLE_CORS", &v)?;
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.security.secret_key.trim().is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        if !(4..=31).contains(&self.security.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "SECURITY_BCRYPT_COST",
                value: self.security.bcrypt_cost.to_string(),
            });
        }
        if !(1..=MAX_TOKEN_EXPIRY_HOURS).contains(&self.security.token_expiry_hours) {
            return Err(ConfigError::InvalidValue {
                key: "SECURITY_TOKEN_EXPIRY_HOURS",
                value: self.security.token_expiry_hours.to_string(),
            });
        }
        if self.api.default_per_page == 0 || self.api.max_per_page < self.api.default_per_page {
            return Err(ConfigError::InvalidValue {
                key: "API_DEFAULT_PER_PAGE",
                value: self.api.default_per_page.to_string(),
            });
        }
        Ok(())
    }

    /// Development preset with a caller-provided database and signing key.
    pub fn for_tests(database_url: impl Into<String>, secret_key: impl Into<String>) -> Self {
        let mut config = Self::development();
        config.database.url = database_url.into();
        config.database.max_connections = 1;
        config.security.secret_key = secret_key.into();
        config.security.bcrypt_cost = 4;
        config
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            database: DatabaseConfig {
                url: "sqlite://customers.db?mode=rwc".to_string(),
                max_connections: 5,
                connection_timeout: 30,
            },
            api: ApiConfig {
                bind: "0.0.0.0".to_string(),
                port: 8000,
                max_request_size_bytes: 1024 * 1024, // 1MB
                default_per_page: 10,
                max_per_page: 100,
            },
            security: SecurityConfig {
                secret_key: DEVELOPMENT_SECRET_KEY.to_string(),
                token_expiry_hours: 2,
                bcrypt_cost: 10,
                enable_cors: true,
                cors_origins: vec!["*".to_string()],
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: "sqlite://customers.db?mode=rwc".to_string(),
                max_connections: 10,
                connection_timeout: 10,
            },
            api: ApiConfig {
                bind: "0.0.0.0".to_string(),
                port: 8000,
                max_request_size_bytes: 256 * 1024,
                default_per_page: 10,
                max_per_page: 100,
            },
            security: SecurityConfig {
                secret_key: String::new(),
                token_expiry_hours: 2,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: "sqlite://customers.db?mode=rwc".to_string(),
                max_connections: 20,
                connection_timeout: 5,
            },
            api: ApiConfig {
                bind: "0.0.0.0".to_string(),
                port: 8000,
                max_request_size_bytes: 64 * 1024,
                default_per_page: 10,
                max_per_page: 100,
            },
            security: SecurityConfig {
                secret_key: String::new(),
                token_expiry_hours: 2,
                bcrypt_cost: bcrypt::DEFAULT_COST,
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
            },
        }
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    })
}
