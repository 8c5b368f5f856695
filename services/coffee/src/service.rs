//! Coffee lifecycle operations on top of a [`CoffeeStore`]

use std::sync::Arc;

use chrono::Utc;
use common::error::StoreResult;
use tracing::{debug, info, warn};

use crate::{
    models::{CoffeeItem, CreateCoffeeRequest, UpdateCoffeeRequest},
    repositories::CoffeeStore,
    update::compile_update,
};

/// Coffee catalog service
#[derive(Clone)]
pub struct CoffeeService {
    store: Arc<dyn CoffeeStore>,
}

impl CoffeeService {
    /// Create a new coffee service over the given store
    pub fn new(store: Arc<dyn CoffeeStore>) -> Self {
        Self { store }
    }

    /// Create a coffee from a validated request
    pub async fn create(&self, request: CreateCoffeeRequest) -> StoreResult<CoffeeItem> {
        let coffee = CoffeeItem::new(request, Utc::now());
        self.store.put(&coffee).await?;
        info!("Created coffee {} ({})", coffee.id, coffee.name);
        Ok(coffee)
    }

    /// Get a coffee by ID
    pub async fn get(&self, id: &str) -> StoreResult<Option<CoffeeItem>> {
        self.store.get(id).await
    }

    /// Get all coffees
    pub async fn list(&self) -> StoreResult<Vec<CoffeeItem>> {
        self.store.scan_all().await
    }

    /// Apply a validated partial update, returning `None` if the coffee is missing
    pub async fn update(
        &self,
        id: &str,
        request: &UpdateCoffeeRequest,
    ) -> StoreResult<Option<CoffeeItem>> {
        if request.is_empty() {
            warn!("Update for coffee {} carries no fields", id);
        }

        let plan = compile_update(id, request, Utc::now());
        debug!("Updating coffee {}: {}", id, plan);

        let updated = self.store.apply_assignments(&plan).await?;
        if updated.is_some() {
            info!("Updated coffee {}", id);
        }
        Ok(updated)
    }

    /// Delete a coffee, returning whether it existed
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let deleted = self.store.delete(id).await?;
        if deleted {
            info!("Deleted coffee {}", id);
        }
        Ok(deleted)
    }

    /// Check if the backing store is reachable
    pub async fn health_check(&self) -> StoreResult<bool> {
        self.store.health_check().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryCoffeeStore;
    use crate::validation::validate_create;
    use serde_json::json;

    fn service() -> CoffeeService {
        CoffeeService::new(Arc::new(MemoryCoffeeStore::new()))
    }

    fn espresso() -> CreateCoffeeRequest {
        validate_create(&json!({
            "name": "Espresso",
            "description": "Strong shot",
            "price": 2.5,
            "category": "Hot",
            "available": true
        }))
        .expect("payload should be valid")
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() -> StoreResult<()> {
        let service = service();
        let created = service.create(espresso()).await?;

        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let fetched = service.get(&created.id).await?.expect("coffee exists");
        assert_eq!(fetched, created);
        assert_eq!(fetched.name, "Espresso");
        assert_eq!(fetched.description, "Strong shot");
        assert_eq!(fetched.price, 2.5);
        assert_eq!(fetched.category, "Hot");
        assert!(fetched.available);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_is_none() -> StoreResult<()> {
        assert_eq!(service().get("nope").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_keeps_identity_and_bumps_timestamp() -> StoreResult<()> {
        let service = service();
        let created = service.create(espresso()).await?;

        let request = UpdateCoffeeRequest {
            name: Some("Double Espresso".to_string()),
            ..Default::default()
        };
        let updated = service
            .update(&created.id, &request)
            .await?
            .expect("coffee exists");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Double Espresso");
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= updated.created_at);
        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_is_none() -> StoreResult<()> {
        let request = UpdateCoffeeRequest {
            price: Some(1.0),
            ..Default::default()
        };
        assert_eq!(service().update("nope", &request).await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_twice() -> StoreResult<()> {
        let service = service();
        let created = service.create(espresso()).await?;

        assert!(service.delete(&created.id).await?);
        assert!(!service.delete(&created.id).await?);
        assert!(service.list().await?.is_empty());
        Ok(())
    }
}
