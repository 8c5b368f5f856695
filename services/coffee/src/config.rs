//! Service configuration
//!
//! Settings are read from `COFFEE_*` environment variables on top of the
//! defaults below. Redis connection details live in
//! [`common::cache::RedisConfig`].

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Redis,
    Memory,
}

/// Coffee service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Interface to bind (`COFFEE_HOST`, default "0.0.0.0")
    pub host: String,
    /// Port to listen on (`COFFEE_PORT`, default 3002)
    pub port: u16,
    /// Storage backend (`COFFEE_STORAGE`, default "redis")
    pub storage: StorageBackend,
    /// Fallback log filter when `RUST_LOG` is unset (`COFFEE_LOG_LEVEL`, default "info")
    pub log_level: String,
}

impl Settings {
    /// Load settings from the environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3002_i64)?
            .set_default("storage", "redis")?
            .set_default("log_level", "info")?
            .add_source(Environment::with_prefix("COFFEE").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Socket address to bind, e.g. "0.0.0.0:3002"
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment run serially.
        unsafe {
            for key in ["COFFEE_HOST", "COFFEE_PORT", "COFFEE_STORAGE", "COFFEE_LOG_LEVEL"] {
                std::env::remove_var(key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_settings_defaults() {
        clear_env();
        let settings = Settings::from_env().expect("Failed to load settings");
        assert_eq!(settings.bind_address(), "0.0.0.0:3002");
        assert_eq!(settings.storage, StorageBackend::Redis);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    #[serial]
    fn test_settings_from_environment() {
        clear_env();
        unsafe {
            std::env::set_var("COFFEE_PORT", "8080");
            std::env::set_var("COFFEE_STORAGE", "memory");
            std::env::set_var("COFFEE_LOG_LEVEL", "debug");
        }
        let settings = Settings::from_env();
        clear_env();

        let settings = settings.expect("Failed to load settings");
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.storage, StorageBackend::Memory);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    #[serial]
    fn test_unknown_backend_rejected() {
        clear_env();
        unsafe { std::env::set_var("COFFEE_STORAGE", "dynamo") };
        let settings = Settings::from_env();
        clear_env();

        assert!(settings.is_err());
    }
}
