//! Configuration loading and representation.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `BIND_ADDR` | `0.0.0.0:8080` | HTTP listen address |
//! | `DATABASE_URL` | `sqlite://shopfloor.db` | SQLite database (created if missing) |
//! | `USE_PERSISTENT_STORES` | `true` | `false` selects the in-memory stores |
//! | `DATABASE_MAX_CONNECTIONS` | `5` | pool size (ignored for `sqlite::memory:`) |

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://shopfloor.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Process configuration for the API server and the utilities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    pub use_persistent_stores: bool,
    pub max_connections: u32,
}

impl AppConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load through an arbitrary key lookup (tests pass a map instead of
    /// touching the process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse_with(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR, |v| {
            v.parse::<SocketAddr>().map_err(|e| e.to_string())
        })?;

        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let use_persistent_stores =
            parse_with(&lookup, "USE_PERSISTENT_STORES", "true", parse_bool)?;

        let max_connections = parse_with(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            &DEFAULT_MAX_CONNECTIONS.to_string(),
            |v| match v.parse::<u32>() {
                Ok(0) => Err("must be at least 1".to_string()),
                Ok(n) => Ok(n),
                Err(e) => Err(e.to_string()),
            },
        )?;

        Ok(Self {
            bind_addr,
            database_url,
            use_persistent_stores,
            max_connections,
        })
    }
}

fn parse_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    parse(raw.trim()).map_err(|reason| ConfigError::Invalid {
        key,
        value: raw.clone(),
        reason,
    })
}

fn parse_bool(v: &str) -> Result<bool, String> {
    match v.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err("expected true or false".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = load(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
        assert!(cfg.use_persistent_stores);
        assert_eq!(cfg.max_connections, 5);
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = load(&[
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("USE_PERSISTENT_STORES", "FALSE"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 3000);
        assert_eq!(cfg.database_url, "sqlite::memory:");
        assert!(!cfg.use_persistent_stores);
        assert_eq!(cfg.max_connections, 2);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = load(&[("USE_PERSISTENT_STORES", "maybe")]).unwrap_err();
        let ConfigError::Invalid { key, value, .. } = err;
        assert_eq!(key, "USE_PERSISTENT_STORES");
        assert_eq!(value, "maybe");

        assert!(load(&[("BIND_ADDR", "not-an-addr")]).is_err());
        assert!(load(&[("DATABASE_MAX_CONNECTIONS", "0")]).is_err());
    }

    #[test]
    fn blank_database_url_falls_back_to_default() {
        let cfg = load(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(cfg.database_url, DEFAULT_DATABASE_URL);
    }
}
