//! Runtime configuration types.

use std::net::SocketAddr;
use std::time::Duration;

/// How to reach PostgreSQL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Network {
    #[default]
    Tcp,
    /// `host` names the socket directory.
    Unix,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub network: Network,
    pub max_connections: u32,
    pub statement_timeout: Option<Duration>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub db: DbConfig,
    pub server_addr: SocketAddr,
    pub http_timeout: Duration,
    pub shutdown_timeout: Duration,
}

pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_SERVER_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 8001);
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;
