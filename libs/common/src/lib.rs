//! Common library for the coffee catalog
//!
//! This crate provides shared functionality used by the services of the
//! workspace: Redis connectivity and the storage error types.
//!
//! ```rust,no_run
//! use common::cache::{RedisConfig, RedisPool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RedisConfig::from_env()?;
//!     let pool = RedisPool::new(&config)?;
//!     let is_healthy = pool.health_check().await?;
//!     println!("Redis health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod error;
