//! User service configuration.

use std::env;
use std::str::FromStr;

use common::{AppError, AppResult, DatabaseConfig};

/// User service configuration.
#[derive(Debug, Clone, Default)]
pub struct UserServiceConfig {
    /// Connection parameters for the users database
    pub database: DatabaseConfig,
    /// Apply pending migrations right after connecting
    pub auto_migrate: bool,
}

impl UserServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to defaults; set but unparsable values are an error.
    pub fn from_env() -> AppResult<Self> {
        let defaults = DatabaseConfig::default();

        let database = DatabaseConfig {
            url: env::var("USER_SERVICE_DATABASE_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .unwrap_or(defaults.url),
            max_connections: parse_var("DATABASE_MAX_CONNECTIONS", defaults.max_connections)?,
            min_connections: parse_var("DATABASE_MIN_CONNECTIONS", defaults.min_connections)?,
            connect_timeout_secs: parse_var(
                "DATABASE_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            sql_logging: parse_var("DATABASE_SQL_LOGGING", defaults.sql_logging)?,
        };

        Ok(Self {
            database,
            auto_migrate: parse_var("USER_SERVICE_AUTO_MIGRATE", false)?,
        })
    }

    /// Override the database URL (from the command line).
    pub fn with_database_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.database.url = url;
        }
        self
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => parse_value(name, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T: FromStr>(name: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::config(format!("{} has an invalid value: {:?}", name, raw)))
}
