//! Redis connection module for the coffee catalog
//!
//! This module provides the Redis configuration and the long-lived client
//! handle that storage adapters borrow connections from.

use redis::{Client, aio::MultiplexedConnection};
use tracing::info;

use crate::error::{StoreError, StoreResult};

/// Configuration for Redis connection
#[derive(Debug, Clone)]
pub struct RedisConfig {
    /// Redis connection URL (e.g., "redis://localhost:6379")
    pub url: String,
    /// Namespace prepended to every key written by the service
    pub key_prefix: String,
}

impl RedisConfig {
    /// Create a new RedisConfig from environment variables
    ///
    /// # Environment Variables
    /// - `REDIS_URL`: Redis connection URL (default: "redis://localhost:6379")
    /// - `REDIS_KEY_PREFIX`: Key namespace (default: "coffee")
    pub fn from_env() -> StoreResult<Self> {
        let url =
            std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
        let key_prefix =
            std::env::var("REDIS_KEY_PREFIX").unwrap_or_else(|_| "coffee".to_string());

        let key_prefix = key_prefix.trim().trim_end_matches(':').to_string();
        if key_prefix.is_empty() {
            return Err(StoreError::Configuration(
                "REDIS_KEY_PREFIX must not be empty".to_string(),
            ));
        }

        Ok(RedisConfig { url, key_prefix })
    }
}

/// Shared Redis client handle
#[derive(Clone)]
pub struct RedisPool {
    client: Client,
    key_prefix: String,
}

impl RedisPool {
    /// Initialize a new Redis client
    pub fn new(config: &RedisConfig) -> StoreResult<Self> {
        let client = Client::open(config.url.clone())
            .map_err(|e| StoreError::Configuration(format!("Invalid Redis URL: {}", e)))?;
        info!("Redis client initialized with URL: {}", config.url);
        Ok(RedisPool {
            client,
            key_prefix: config.key_prefix.clone(),
        })
    }

    /// Get a multiplexed connection
    pub async fn connection(&self) -> StoreResult<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(StoreError::Connection)
    }

    /// Build a namespaced key, e.g. `coffee:item:42`
    pub fn key(&self, parts: &[&str]) -> String {
        let mut key = self.key_prefix.clone();
        for part in parts {
            key.push(':');
            key.push_str(part);
        }
        key
    }

    /// Check if Redis is reachable
    pub async fn health_check(&self) -> StoreResult<bool> {
        let mut conn = self.connection().await?;
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(StoreError::Command)?;
        Ok(pong == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment run serially.
        unsafe {
            std::env::remove_var("REDIS_URL");
            std::env::remove_var("REDIS_KEY_PREFIX");
        }
    }

    #[test]
    #[serial]
    fn test_redis_config_defaults() {
        clear_env();
        let config = RedisConfig::from_env().expect("Failed to create redis config");
        assert_eq!(config.url, "redis://localhost:6379");
        assert_eq!(config.key_prefix, "coffee");
    }

    #[test]
    #[serial]
    fn test_redis_config_rejects_blank_prefix() {
        clear_env();
        unsafe { std::env::set_var("REDIS_KEY_PREFIX", " : ") };
        let result = RedisConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[test]
    #[serial]
    fn test_key_namespacing() {
        clear_env();
        unsafe { std::env::set_var("REDIS_KEY_PREFIX", "shop:") };
        let config = RedisConfig::from_env().expect("Failed to create redis config");
        clear_env();

        let pool = RedisPool::new(&config).expect("Failed to create client");
        assert_eq!(pool.key(&["item", "abc"]), "shop:item:abc");
        assert_eq!(pool.key(&["items"]), "shop:items");
    }

    #[test]
    fn test_invalid_url_is_configuration_error() {
        let config = RedisConfig {
            url: "not a url".to_string(),
            key_prefix: "coffee".to_string(),
        };
        assert!(matches!(
            RedisPool::new(&config),
            Err(StoreError::Configuration(_))
        ));
    }

    #[tokio::test]
    #[ignore = "requires a running Redis instance"]
    async fn test_redis_connection() -> StoreResult<()> {
        let config = RedisConfig {
            url: "redis://localhost:6379".to_string(),
            key_prefix: "coffee-test".to_string(),
        };

        let pool = RedisPool::new(&config)?;
        assert!(pool.health_check().await?);
        Ok(())
    }
}
