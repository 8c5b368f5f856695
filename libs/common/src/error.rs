//! Custom error types for the common library
//!
//! This module defines the storage error type shared by every service that
//! talks to the key-value store.

use redis::RedisError;
use thiserror::Error;

/// Custom error type for key-value store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while opening a connection to the store
    #[error("Store connection error: {0}")]
    Connection(#[source] RedisError),

    /// Error occurred while executing a store command
    #[error("Store command error: {0}")]
    Command(#[source] RedisError),

    /// A stored record could not be decoded
    #[error("Corrupt record at {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Configuration error
    #[error("Store configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
