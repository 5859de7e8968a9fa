//! Configuration loading from environment.

use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Request timeout of the NBRB HTTP client.
    pub source_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid port number, got {port:?}"))?,
            None => DEFAULT_PORT,
        };

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let source_timeout_secs = match lookup("SOURCE_TIMEOUT_SECS") {
            Some(secs) => secs.parse().map_err(|_| {
                anyhow::anyhow!("SOURCE_TIMEOUT_SECS must be a whole number of seconds, got {secs:?}")
            })?,
            None => DEFAULT_SOURCE_TIMEOUT_SECS,
        };

        Ok(Self {
            port,
            database_url,
            source_timeout: Duration::from_secs(source_timeout_secs),
        })
    }
}
