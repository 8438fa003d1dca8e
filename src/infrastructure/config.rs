use anyhow::Context;
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "steward=debug,tower_http=debug";

/// Connection pool tuning, read from the `DB_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 20,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(600),
        }
    }
}

/// Process configuration, taken from the environment (after `.env` is loaded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    /// When unset, administrators are kept in memory for the life of the process.
    pub database_url: Option<String>,
    pub log_filter: String,
    pub cors_allowed_origins: String,
    pub pool: PoolSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("PORT must be a port number, got {port:?}"))?,
            None => DEFAULT_PORT,
        };

        let defaults = PoolSettings::default();
        let number = |key: &str, default: u64| {
            lookup(key)
                .and_then(|value| value.parse().ok())
                .unwrap_or(default)
        };
        let pool = PoolSettings {
            max_connections: number("DB_MAX_CONNECTIONS", defaults.max_connections.into()) as u32,
            min_connections: number("DB_MIN_CONNECTIONS", defaults.min_connections.into()) as u32,
            acquire_timeout: Duration::from_secs(number(
                "DB_ACQUIRE_TIMEOUT_SECS",
                defaults.acquire_timeout.as_secs(),
            )),
            idle_timeout: Duration::from_secs(number(
                "DB_IDLE_TIMEOUT_SECS",
                defaults.idle_timeout.as_secs(),
            )),
        };

        Ok(Self {
            port,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            cors_allowed_origins: lookup("CORS_ALLOWED_ORIGINS").unwrap_or_default(),
            pool,
        })
    }
}
