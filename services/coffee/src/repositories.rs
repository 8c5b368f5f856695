//! Repositories for coffee persistence

use async_trait::async_trait;
use common::error::StoreResult;

use crate::{models::CoffeeItem, update::UpdatePlan};

pub mod memory;
pub mod redis_store;

pub use memory::MemoryCoffeeStore;
pub use redis_store::RedisCoffeeStore;

/// Key-value storage for coffee items
#[async_trait]
pub trait CoffeeStore: Send + Sync {
    /// Insert or replace an item
    async fn put(&self, item: &CoffeeItem) -> StoreResult<()>;

    /// Get an item by ID
    async fn get(&self, id: &str) -> StoreResult<Option<CoffeeItem>>;

    /// Delete an item, returning whether it existed
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Get every item, in no particular order
    async fn scan_all(&self) -> StoreResult<Vec<CoffeeItem>>;

    /// Atomically apply a compiled update, returning the new item or `None`
    /// when the item does not exist
    async fn apply_assignments(&self, plan: &UpdatePlan) -> StoreResult<Option<CoffeeItem>>;

    /// Check if the store is reachable
    async fn health_check(&self) -> StoreResult<bool>;
}
