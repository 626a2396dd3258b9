//! Application settings loaded from environment variables.

use chrono::{DateTime, Utc};
use std::env;
use std::time::Duration;

use super::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_URL, DEFAULT_EMPLOYEE_CACHE_TTL_SECONDS,
    DEFAULT_MEMORY_CACHE_CAPACITY, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};

/// Application configuration
///
/// Built once at process start and never mutated afterwards; `started_at`
/// is the instant the configuration was loaded and backs liveness reports.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    /// Redis URL; `None` selects the in-process cache
    pub redis_url: Option<String>,
    pub employee_cache_ttl: Duration,
    pub memory_cache_capacity: usize,
    pub default_page_size: u64,
    pub max_page_size: u64,
    pub started_at: DateTime<Utc>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("redis_url", &self.redis_url.as_ref().map(|_| "[REDACTED]"))
            .field("employee_cache_ttl", &self.employee_cache_ttl)
            .field("memory_cache_capacity", &self.memory_cache_capacity)
            .field("default_page_size", &self.default_page_size)
            .field("max_page_size", &self.max_page_size)
            .field("started_at", &self.started_at)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            database_max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or(DEFAULT_DATABASE_MAX_CONNECTIONS),
            redis_url: env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty()),
            employee_cache_ttl: Duration::from_secs(
                parse_var("EMPLOYEE_CACHE_TTL_SECONDS")
                    .unwrap_or(DEFAULT_EMPLOYEE_CACHE_TTL_SECONDS),
            ),
            memory_cache_capacity: parse_var("MEMORY_CACHE_CAPACITY")
                .filter(|capacity| *capacity > 0)
                .unwrap_or(DEFAULT_MEMORY_CACHE_CAPACITY),
            default_page_size: parse_var("DEFAULT_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            max_page_size: parse_var("MAX_PAGE_SIZE")
                .filter(|size| *size > 0)
                .unwrap_or(MAX_PAGE_SIZE),
            started_at: Utc::now(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            redis_url: None,
            employee_cache_ttl: Duration::from_secs(DEFAULT_EMPLOYEE_CACHE_TTL_SECONDS),
            memory_cache_capacity: DEFAULT_MEMORY_CACHE_CAPACITY,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
            started_at: Utc::now(),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
