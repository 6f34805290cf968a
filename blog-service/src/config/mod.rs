use service_core::config as core_config;
use service_core::error::AppError;
use service_core::observability::logging::LogFormat;
use std::env;

#[derive(Debug, Clone)]
pub struct BlogConfig {
    pub common: core_config::Config,
    pub log_format: LogFormat,
    pub store: StoreConfig,
    pub jwt: JwtConfig,
    pub security: SecurityConfig,
    pub api_docs: ApiDocsConfig,
}

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub mongodb: MongoConfig,
}

/// Which document-store backend serves user and post records. The in-memory
/// backend exists for local development and the integration test suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    MongoDb,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry_days: i64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ApiDocsConfig {
    pub enabled: bool,
}

impl BlogConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        let is_prod = common.environment.is_prod();

        let default_log_format = if is_prod { "json" } else { "compact" };

        let config = BlogConfig {
            common,
            log_format: get_env("LOG_FORMAT", Some(default_log_format), is_prod)?
                .parse()
                .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
            store: StoreConfig {
                backend: get_env("STORE_BACKEND", Some("mongodb"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                mongodb: MongoConfig {
                    uri: get_env("MONGODB_URI", Some("mongodb://localhost:27017"), is_prod)?,
                    database: get_env("MONGODB_DATABASE", Some("blog_db"), is_prod)?,
                },
            },
            jwt: JwtConfig {
                secret: get_env("JWT_SECRET", Some("dev-only-insecure-secret"), is_prod)?,
                token_expiry_days: get_env("JWT_TOKEN_EXPIRY_DAYS", Some("7"), is_prod)?
                    .parse()
                    .map_err(|e: std::num::ParseIntError| {
                        AppError::ConfigError(anyhow::anyhow!(e.to_string()))
                    })?,
            },
            security: SecurityConfig {
                allowed_origins: get_env("ALLOWED_ORIGINS", Some("http://localhost:3000"), is_prod)?
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .collect(),
            },
            api_docs: ApiDocsConfig {
                enabled: get_env("ENABLE_API_DOCS", Some("true"), is_prod)?
                    .parse()
                    .unwrap_or(true),
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.jwt.secret.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_SECRET must not be empty"
            )));
        }

        if self.jwt.token_expiry_days <= 0 {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "JWT_TOKEN_EXPIRY_DAYS must be positive"
            )));
        }

        if self.common.environment.is_prod() {
            if self.store.backend == StoreBackend::Memory {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "The in-memory store is not durable and cannot be used in production"
                )));
            }

            if self.security.allowed_origins.iter().any(|o| o == "*") {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Wildcard CORS origin not allowed in production"
                )));
            }
        }

        Ok(())
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "mongodb" => Ok(StoreBackend::MongoDb),
            _ => Err(format!("Invalid store backend: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service_core::config::Environment;

    fn test_config(environment: Environment, backend: StoreBackend) -> BlogConfig {
        BlogConfig {
            common: core_config::Config {
                port: 0,
                environment,
                log_level: "info".to_string(),
            },
            log_format: LogFormat::Compact,
            store: StoreConfig {
                backend,
                mongodb: MongoConfig {
                    uri: "mongodb://localhost:27017".to_string(),
                    database: "blog_db".to_string(),
                },
            },
            jwt: JwtConfig {
                secret: "secret".to_string(),
                token_expiry_days: 7,
            },
            security: SecurityConfig {
                allowed_origins: vec!["http://localhost:3000".to_string()],
            },
            api_docs: ApiDocsConfig { enabled: false },
        }
    }

    #[test]
    fn memory_backend_is_rejected_in_prod() {
        let config = test_config(Environment::Prod, StoreBackend::Memory);
        assert!(config.validate().is_err());

        let config = test_config(Environment::Dev, StoreBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn expiry_must_be_positive() {
        let mut config = test_config(Environment::Dev, StoreBackend::Memory);
        config.jwt.token_expiry_days = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn store_backend_parses() {
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!("MongoDB".parse::<StoreBackend>(), Ok(StoreBackend::MongoDb));
        assert!("postgres".parse::<StoreBackend>().is_err());
    }
}
