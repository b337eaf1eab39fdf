//! Runtime settings read from environment variables.
//!
//! | Variable             | Default           |
//! |----------------------|-------------------|
//! | `BOOKING_HOST`       | `127.0.0.1`       |
//! | `BOOKING_PORT`       | `8080`            |
//! | `BOOKING_DB_PATH`    | `bookings.sqlite` |
//! | `BOOKING_COLLECTION` | `bookings`        |
//! | `BOOKING_JSON_LIMIT` | `1048576` (bytes) |

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub collection: String,
    pub json_limit: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("bookings.sqlite"),
            collection: "bookings".to_string(),
            json_limit: 1024 * 1024,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, falling back to defaults for
    /// unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(host) = lookup("BOOKING_HOST") {
            settings.host = host;
        }
        if let Some(port) = lookup("BOOKING_PORT") {
            settings.port = parse("BOOKING_PORT", port)?;
        }
        if let Some(path) = lookup("BOOKING_DB_PATH") {
            settings.db_path = PathBuf::from(path);
        }
        if let Some(collection) = lookup("BOOKING_COLLECTION") {
            settings.collection = collection;
        }
        if let Some(limit) = lookup("BOOKING_JSON_LIMIT") {
            settings.json_limit = parse("BOOKING_JSON_LIMIT", limit)?;
        }

        Ok(settings)
    }
}

fn parse<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn unset_keys_use_defaults() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn overrides_are_applied() {
        let settings = Settings::from_lookup(lookup(&[
            ("BOOKING_HOST", "0.0.0.0"),
            ("BOOKING_PORT", "9000"),
            ("BOOKING_DB_PATH", "/tmp/b.sqlite"),
            ("BOOKING_COLLECTION", "labs"),
        ]))
        .unwrap();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.db_path, PathBuf::from("/tmp/b.sqlite"));
        assert_eq!(settings.collection, "labs");
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = Settings::from_lookup(lookup(&[("BOOKING_PORT", "eighty")])).unwrap_err();
        assert!(err.to_string().contains("BOOKING_PORT"));
    }
}
