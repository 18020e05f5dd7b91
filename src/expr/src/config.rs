//! Environment-driven engine configuration
//!
//! Environment variables:
//! - `SCOPE_PARSE_MODE` - `compatible` or `strict` (default: compatible)
//! - `SCOPE_CACHE` - enable the compiled expression cache (default: true)
//! - `SCOPE_CACHE_CAPACITY` - maximum cached expressions (default: 10000)
//! - `SCOPE_CACHE_TTL` - cache TTL in seconds (default: 60)

use std::str::FromStr;
use std::time::Duration;

use crate::engine::EngineConfig;
use crate::error::{FieldscopeError, Result};

pub const ENV_PARSE_MODE: &str = "SCOPE_PARSE_MODE";
pub const ENV_CACHE: &str = "SCOPE_CACHE";
pub const ENV_CACHE_CAPACITY: &str = "SCOPE_CACHE_CAPACITY";
pub const ENV_CACHE_TTL: &str = "SCOPE_CACHE_TTL";

impl EngineConfig {
    /// Load configuration from the process environment
    ///
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`FieldscopeError::Config`] when a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<L>(lookup: L) -> Result<Self>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = read(&lookup, ENV_PARSE_MODE)? {
            config.mode = mode;
        }

        if let Some(enabled) = lookup(ENV_CACHE) {
            config.enable_cache = parse_flag(ENV_CACHE, &enabled)?;
        }

        if let Some(capacity) = read(&lookup, ENV_CACHE_CAPACITY)? {
            config.cache_config.capacity = capacity;
        }

        if let Some(secs) = read::<u64, _>(&lookup, ENV_CACHE_TTL)? {
            config.cache_config.ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn read<T, L>(lookup: &L, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    L: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| FieldscopeError::Config(format!("{}='{}': {}", key, raw, e))),
        None => Ok(None),
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(FieldscopeError::Config(format!(
            "{}='{}': expected a boolean",
            key, raw
        ))),
    }
}
