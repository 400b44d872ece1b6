//! Application configuration module
//!
//! Provides the configuration types for the server: which document store to
//! open, where to listen, the bcrypt cost factor, and session lifetime.
//!
//! # Environment Variables
//!
//! | Variable             | Default                        |
//! |----------------------|--------------------------------|
//! | `DATABASE_URL`       | `sqlite://docauth.db?mode=rwc` |
//! | `SERVER_PORT`        | `3000`                         |
//! | `BCRYPT_COST`        | `12`                           |
//! | `SESSION_TTL_HOURS`  | `720`                          |
//! | `STORE_TIMEOUT_SECS` | `5`                            |
//!
//! `DATABASE_URL=memory` selects the in-memory store.

use std::time::Duration;
use thiserror::Error;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://docauth.db?mode=rwc";
/// Default listening port
pub const DEFAULT_PORT: u16 = 3000;
/// Default bcrypt cost factor
pub const DEFAULT_BCRYPT_COST: u32 = 12;
/// Default session lifetime (30 days)
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 30 * 24;
/// Default store acquire timeout
pub const DEFAULT_STORE_TIMEOUT_SECS: u64 = 5;

/// Longest session lifetime accepted (10 years)
pub const MAX_SESSION_TTL_HOURS: u64 = 10 * 365 * 24;

/// Lowest cost bcrypt accepts
pub const MIN_BCRYPT_COST: u32 = 4;
/// Highest cost bcrypt accepts
pub const MAX_BCRYPT_COST: u32 = 31;

/// Which document store to open at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process-local store, lost on restart
    Memory,
    /// SQLite JSON document store at the given URL
    Sqlite(String),
}

impl StoreBackend {
    fn parse(url: &str) -> Result<Self, ConfigError> {
        if url.eq_ignore_ascii_case("memory") {
            Ok(Self::Memory)
        } else if url.starts_with("sqlite:") {
            Ok(Self::Sqlite(url.to_string()))
        } else {
            Err(ConfigError::InvalidUrl(url.to_string()))
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Document store to open
    pub store: StoreBackend,
    /// Listening port
    pub port: u16,
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
    /// Session lifetime in hours
    pub session_ttl_hours: u64,
    /// Store acquire timeout
    pub store_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::Sqlite(DEFAULT_DATABASE_URL.to_string()),
            port: DEFAULT_PORT,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            store_timeout: Duration::from_secs(DEFAULT_STORE_TIMEOUT_SECS),
        }
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_number("SERVER_PORT", &port)?);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_number("BCRYPT_COST", &cost)?);
        }
        if let Some(ttl) = lookup("SESSION_TTL_HOURS") {
            builder = builder.session_ttl_hours(parse_number("SESSION_TTL_HOURS", &ttl)?);
        }
        if let Some(secs) = lookup("STORE_TIMEOUT_SECS") {
            builder = builder.store_timeout(Duration::from_secs(parse_number(
                "STORE_TIMEOUT_SECS",
                &secs,
            )?));
        }

        builder.build()
    }

    /// Session lifetime as a signed duration
    pub fn session_ttl(&self) -> chrono::Duration {
        // validate() caps the value well below i64::MAX hours
        chrono::Duration::hours(self.session_ttl_hours as i64)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::OutOfRange {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.session_ttl_hours == 0 || self.session_ttl_hours > MAX_SESSION_TTL_HOURS {
            return Err(ConfigError::OutOfRange {
                key: "SESSION_TTL_HOURS",
                value: self.session_ttl_hours.to_string(),
            });
        }
        if self.store_timeout.is_zero() {
            return Err(ConfigError::OutOfRange {
                key: "STORE_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        key,
        value: raw.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    port: Option<u16>,
    bcrypt_cost: Option<u32>,
    session_ttl_hours: Option<u64>,
    store_timeout: Option<Duration>,
}

impl AppConfigBuilder {
    /// Set the store URL (`memory` or a `sqlite:` URL)
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the listening port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the bcrypt cost factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Set the session lifetime in hours
    pub fn session_ttl_hours(mut self, hours: u64) -> Self {
        self.session_ttl_hours = Some(hours);
        self
    }

    /// Set the store acquire timeout
    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let defaults = AppConfig::default();
        let store = match self.database_url {
            Some(url) => StoreBackend::parse(&url)?,
            None => defaults.store,
        };

        let config = AppConfig {
            store,
            port: self.port.unwrap_or(defaults.port),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(defaults.bcrypt_cost),
            session_ttl_hours: self.session_ttl_hours.unwrap_or(defaults.session_ttl_hours),
            store_timeout: self.store_timeout.unwrap_or(defaults.store_timeout),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("invalid number for {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("value out of range for {key}: {value}")]
    OutOfRange { key: &'static str, value: String },
}
