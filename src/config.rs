// src/config.rs
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use tracing::warn;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Postgres connection string; products live in memory when absent.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unset and empty variables both count as missing.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(port = %raw, "Invalid PORT, using {}", DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let host = match var("HOST") {
            Some(raw) => raw.trim().parse::<IpAddr>().unwrap_or_else(|_| {
                warn!(host = %raw, "Invalid HOST, using {}", DEFAULT_HOST);
                DEFAULT_HOST
            }),
            None => DEFAULT_HOST,
        };

        Self {
            host,
            port,
            database_url: var("DATABASE_URL"),
        }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}
