//! Load `AppConfig` from environment variables.

use crate::config::types::*;
use crate::config::validator::{network, parsed_or, positive, required};
use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::net::SocketAddr;
use std::time::Duration;

/// Maintenance database used to create the target database when it is missing.
const ADMIN_DB: &str = "postgres";

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = DbConfig {
            host: required("DB_HOST", lookup("DB_HOST"))?,
            port: parsed_or("DB_PORT", lookup("DB_PORT"), DEFAULT_DB_PORT)?,
            username: required("DB_USERNAME", lookup("DB_USERNAME"))?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            name: required("DB_NAME", lookup("DB_NAME"))?,
            network: network(lookup("DB_NETWORK"))?,
            max_connections: parsed_or(
                "DB_MAX_CONNECTIONS",
                lookup("DB_MAX_CONNECTIONS"),
                DEFAULT_MAX_CONNECTIONS,
            )?,
            statement_timeout: match lookup("DB_STATEMENT_TIMEOUT_MS") {
                None => None,
                Some(v) => {
                    let ms = parsed_or("DB_STATEMENT_TIMEOUT_MS", Some(v), 0u64)?;
                    Some(Duration::from_millis(positive("DB_STATEMENT_TIMEOUT_MS", ms)?))
                }
            },
        };
        if db.max_connections == 0 {
            return Err(ConfigError::invalid("DB_MAX_CONNECTIONS", "0", "must be greater than zero"));
        }

        let server_addr: SocketAddr =
            parsed_or("SERVER_ADDR", lookup("SERVER_ADDR"), DEFAULT_SERVER_ADDR.into())?;
        let http_secs = parsed_or("HTTP_TIMEOUT_SECS", lookup("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS)?;
        let shutdown_secs = parsed_or(
            "SHUTDOWN_TIMEOUT_SECS",
            lookup("SHUTDOWN_TIMEOUT_SECS"),
            DEFAULT_SHUTDOWN_TIMEOUT_SECS,
        )?;

        Ok(AppConfig {
            db,
            server_addr,
            http_timeout: Duration::from_secs(positive("HTTP_TIMEOUT_SECS", http_secs)?),
            shutdown_timeout: Duration::from_secs(positive("SHUTDOWN_TIMEOUT_SECS", shutdown_secs)?),
        })
    }
}

impl DbConfig {
    /// Options for the application database.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.base_options().database(&self.name)
    }

    /// Options for the maintenance database on the same server.
    pub fn admin_options(&self) -> PgConnectOptions {
        self.base_options().database(ADMIN_DB)
    }

    fn base_options(&self) -> PgConnectOptions {
        let opts = PgConnectOptions::new()
            .username(&self.username)
            .password(&self.password);
        match self.network {
            Network::Tcp => opts.host(&self.host).port(self.port),
            Network::Unix => opts.socket(&self.host).port(self.port),
        }
    }
}
