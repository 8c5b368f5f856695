//! In-process coffee store

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::error::StoreResult;
use tokio::sync::RwLock;

use super::CoffeeStore;
use crate::{models::CoffeeItem, update::UpdatePlan};

/// Coffee store backed by a shared map
#[derive(Debug, Clone, Default)]
pub struct MemoryCoffeeStore {
    items: Arc<RwLock<HashMap<String, CoffeeItem>>>,
}

impl MemoryCoffeeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CoffeeStore for MemoryCoffeeStore {
    async fn put(&self, item: &CoffeeItem) -> StoreResult<()> {
        self.items
            .write()
            .await
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<CoffeeItem>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        Ok(self.items.write().await.remove(id).is_some())
    }

    async fn scan_all(&self) -> StoreResult<Vec<CoffeeItem>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn apply_assignments(&self, plan: &UpdatePlan) -> StoreResult<Option<CoffeeItem>> {
        let mut items = self.items.write().await;
        Ok(items.get_mut(&plan.id).map(|item| {
            item.apply(&plan.assignments);
            item.clone()
        }))
    }

    async fn health_check(&self) -> StoreResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CreateCoffeeRequest, UpdateCoffeeRequest};
    use crate::update::compile_update;
    use chrono::Utc;

    fn item(name: &str) -> CoffeeItem {
        CoffeeItem::new(
            CreateCoffeeRequest {
                name: name.to_string(),
                description: "Test".to_string(),
                price: 2.0,
                category: "Hot".to_string(),
                available: None,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_put_get_delete() -> StoreResult<()> {
        let store = MemoryCoffeeStore::new();
        let espresso = item("Espresso");

        store.put(&espresso).await?;
        assert_eq!(store.get(&espresso.id).await?, Some(espresso.clone()));

        assert!(store.delete(&espresso.id).await?);
        assert!(!store.delete(&espresso.id).await?);
        assert_eq!(store.get(&espresso.id).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_scan_all_returns_every_item() -> StoreResult<()> {
        let store = MemoryCoffeeStore::new();
        store.put(&item("Espresso")).await?;
        store.put(&item("Latte")).await?;

        let mut names: Vec<String> = store
            .scan_all()
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Espresso", "Latte"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_apply_assignments() -> StoreResult<()> {
        let store = MemoryCoffeeStore::new();
        let latte = item("Latte");
        store.put(&latte).await?;

        let request = UpdateCoffeeRequest {
            category: Some("Cold".to_string()),
            ..Default::default()
        };
        let updated = store
            .apply_assignments(&compile_update(&latte.id, &request, Utc::now()))
            .await?
            .expect("item should exist");

        assert_eq!(updated.category, "Cold");
        assert_eq!(store.get(&latte.id).await?, Some(updated));

        let missing = compile_update("missing", &request, Utc::now());
        assert_eq!(store.apply_assignments(&missing).await?, None);
        Ok(())
    }
}
