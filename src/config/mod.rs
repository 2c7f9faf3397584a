use config::{ConfigError, Environment};
use serde::Deserialize;

// Top-level container for every settings section
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub jwt: JwtConfig,
    pub directory: DirectoryConfig,
    pub circuit_breaker: CircuitBreakerConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub rust_log: String,
    pub storage: StorageBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Required when `storage` is `postgres`.
    pub url: Option<String>,
    pub pool_size: u32,
}

// Redis is optional: without a URL galleries are read straight from storage
#[derive(Debug, Clone, Deserialize)]
pub struct RedisConfig {
    pub url: Option<String>,
    pub gallery_ttl_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

// User directory and image storage endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryConfig {
    pub user_directory_url: String,
    pub photo_storage_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = config::Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8000)?
            .set_default("environment", "development")?
            .set_default("rust_log", "shootbook=debug,tower_http=debug")?
            .set_default("storage_backend", "postgres")?
            .set_default("db_pool_size", 20)?
            .set_default("gallery_cache_ttl_seconds", 300)?
            .set_default("user_directory_url", "http://localhost:8081")?
            .set_default("photo_storage_url", "http://localhost:8082")?
            .set_default("directory_timeout_seconds", 5)?
            .set_default("circuit_breaker_failure_threshold", 5)?
            .set_default("circuit_breaker_timeout_seconds", 60)?
            .add_source(Environment::default().try_parsing(true))
            .build()?;

        let storage = match env.get_string("storage_backend")?.to_lowercase().as_str() {
            "postgres" => StorageBackend::Postgres,
            "memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::Message(format!(
                    "STORAGE_BACKEND must be postgres or memory, got {}",
                    other
                )))
            }
        };

        let database_url = env.get_string("database_url").ok();
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::NotFound("DATABASE_URL".to_string()));
        }

        Ok(Config {
            app: AppConfig {
                host: env.get_string("host")?,
                port: env.get::<u16>("port")?,
                environment: env.get_string("environment")?,
                rust_log: env.get_string("rust_log")?,
                storage,
            },
            database: DatabaseConfig {
                url: database_url,
                pool_size: env.get::<u32>("db_pool_size")?,
            },
            redis: RedisConfig {
                url: env.get_string("redis_url").ok(),
                gallery_ttl_seconds: env.get::<u64>("gallery_cache_ttl_seconds")?,
            },
            jwt: JwtConfig {
                secret: env.get_string("jwt_secret")?,
            },
            directory: DirectoryConfig {
                user_directory_url: env.get_string("user_directory_url")?,
                photo_storage_url: env.get_string("photo_storage_url")?,
                timeout_seconds: env.get::<u64>("directory_timeout_seconds")?,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: env.get::<u32>("circuit_breaker_failure_threshold")?,
                timeout_seconds: env.get::<u64>("circuit_breaker_timeout_seconds")?,
            },
        })
    }

    /// Settings for tests and local runs against in-memory storage.
    pub fn in_memory(jwt_secret: &str) -> Self {
        Config {
            app: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
                rust_log: "shootbook=debug".to_string(),
                storage: StorageBackend::Memory,
            },
            database: DatabaseConfig {
                url: None,
                pool_size: 1,
            },
            redis: RedisConfig {
                url: None,
                gallery_ttl_seconds: 300,
            },
            jwt: JwtConfig {
                secret: jwt_secret.to_string(),
            },
            directory: DirectoryConfig {
                user_directory_url: "http://localhost:8081".to_string(),
                photo_storage_url: "http://localhost:8082".to_string(),
                timeout_seconds: 5,
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: 5,
                timeout_seconds: 60,
            },
        }
    }
}
