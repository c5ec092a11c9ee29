use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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
    /// Postgres connection string. Required by the server binary.
    pub url: Option<String>,
    pub max_connections: u32,
    /// Seconds to wait for a pooled connection
    pub connection_timeout: u64,
    /// Issue CREATE TABLE IF NOT EXISTS for both tables at startup
    pub create_tables: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Fetch window used when a list request carries no `size`
    pub default_page_size: i64,
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub enable_cors: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = env::var("HOST") {
            self.server.host = host;
        }
        self.server.port = env_or("PORT", self.server.port);

        if let Ok(url) = env::var("DATABASE_URL") {
            self.database.url = Some(url);
        }
        self.database.max_connections =
            env_or("DATABASE_MAX_CONNECTIONS", self.database.max_connections);
        self.database.connection_timeout =
            env_or("DATABASE_CONNECTION_TIMEOUT", self.database.connection_timeout);
        self.database.create_tables = env_or("DATABASE_CREATE_TABLES", self.database.create_tables);

        // A page size below 1 would make every list empty
        let page_size = env_or("API_DEFAULT_PAGE_SIZE", self.api.default_page_size);
        if page_size > 0 {
            self.api.default_page_size = page_size;
        }
        self.api.enable_request_logging =
            env_or("API_ENABLE_REQUEST_LOGGING", self.api.enable_request_logging);
        self.api.max_request_size_bytes =
            env_or("API_MAX_REQUEST_SIZE_BYTES", self.api.max_request_size_bytes);

        self.security.enable_cors = env_or("SECURITY_ENABLE_CORS", self.security.enable_cors);
        self
    }

    /// Local defaults: small pool, tables created on boot, request tracing on
    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
                create_tables: true,
            },
            api: ApiConfig {
                default_page_size: 10,
                enable_request_logging: true,
                max_request_size_bytes: 1024 * 1024,
            },
            security: SecurityConfig { enable_cors: true },
        }
    }

    fn staging() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Staging;
        config.database.max_connections = 10;
        config.database.connection_timeout = 10;
        config.api.max_request_size_bytes = 512 * 1024;
        config
    }

    /// Production expects the schema to be managed outside the process
    fn production() -> Self {
        let mut config = Self::development();
        config.environment = Environment::Production;
        config.database.max_connections = 20;
        config.database.connection_timeout = 5;
        config.database.create_tables = false;
        config.api.enable_request_logging = false;
        config.api.max_request_size_bytes = 256 * 1024;
        config
    }
}

/// Parsed value of `key`, or `current` when unset or unparsable
fn env_or<T: FromStr>(key: &str, current: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or(current),
        Err(_) => current,
    }
}

/// Read once, on first access
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}
