//! Redis coffee store
//!
//! Each item is a hash at `{prefix}:item:{id}`; the set `{prefix}:items`
//! indexes the IDs so the catalog can be listed without `KEYS`.

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use async_trait::async_trait;
use common::{
    cache::RedisPool,
    error::{StoreError, StoreResult},
};
use redis::{AsyncCommands, Script};
use tracing::warn;

use super::CoffeeStore;
use crate::{
    models::{CoffeeField, CoffeeItem},
    update::{Assignment, UpdatePlan},
};

/// Sets every assignment on an existing hash in one step; nil when absent.
const APPLY_ASSIGNMENTS: &str = r#"
if redis.call('EXISTS', KEYS[1]) == 0 then
    return false
end
redis.call('HSET', KEYS[1], unpack(ARGV))
return redis.call('HGETALL', KEYS[1])
"#;

/// Coffee store backed by Redis hashes
#[derive(Clone)]
pub struct RedisCoffeeStore {
    pool: RedisPool,
    apply_script: Script,
}

impl RedisCoffeeStore {
    /// Create a new Redis coffee store
    pub fn new(pool: RedisPool) -> Self {
        Self {
            pool,
            apply_script: Script::new(APPLY_ASSIGNMENTS),
        }
    }

    fn item_key(&self, id: &str) -> String {
        self.pool.key(&["item", id])
    }

    fn index_key(&self) -> String {
        self.pool.key(&["items"])
    }
}

#[async_trait]
impl CoffeeStore for RedisCoffeeStore {
    async fn put(&self, item: &CoffeeItem) -> StoreResult<()> {
        let mut conn = self.pool.connection().await?;
        let _: () = redis::pipe()
            .atomic()
            .hset_multiple(self.item_key(&item.id), &encode_item(item))
            .ignore()
            .sadd(self.index_key(), &item.id)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(StoreError::Command)?;
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Option<CoffeeItem>> {
        let key = self.item_key(id);
        let mut conn = self.pool.connection().await?;
        let row: HashMap<String, String> =
            conn.hgetall(&key).await.map_err(StoreError::Command)?;

        if row.is_empty() {
            return Ok(None);
        }
        decode_item(&key, row).map(Some)
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut conn = self.pool.connection().await?;
        let (removed, _): (u64, u64) = redis::pipe()
            .atomic()
            .del(self.item_key(id))
            .srem(self.index_key(), id)
            .query_async(&mut conn)
            .await
            .map_err(StoreError::Command)?;
        Ok(removed > 0)
    }

    async fn scan_all(&self) -> StoreResult<Vec<CoffeeItem>> {
        let mut conn = self.pool.connection().await?;
        let ids: Vec<String> = conn
            .smembers(self.index_key())
            .await
            .map_err(StoreError::Command)?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut pipe = redis::pipe();
        for id in &ids {
            pipe.hgetall(self.item_key(id));
        }
        let rows: Vec<HashMap<String, String>> = pipe
            .query_async(&mut conn)
            .await
            .map_err(StoreError::Command)?;

        decode_rows(&ids, rows, |id| self.item_key(id))
    }

    async fn apply_assignments(&self, plan: &UpdatePlan) -> StoreResult<Option<CoffeeItem>> {
        let key = self.item_key(&plan.id);
        let mut invocation = self.apply_script.key(&key);
        for assignment in &plan.assignments {
            invocation
                .arg(assignment.field().as_str())
                .arg(encode_assignment(assignment));
        }

        let mut conn = self.pool.connection().await?;
        let row: Option<HashMap<String, String>> = invocation
            .invoke_async(&mut conn)
            .await
            .map_err(StoreError::Command)?;

        row.map(|row| decode_item(&key, row)).transpose()
    }

    async fn health_check(&self) -> StoreResult<bool> {
        self.pool.health_check().await
    }
}

fn encode_assignment(assignment: &Assignment) -> String {
    match assignment {
        Assignment::Name(v) | Assignment::Description(v) | Assignment::Category(v) => v.clone(),
        Assignment::Price(v) => v.to_string(),
        Assignment::Available(v) => v.to_string(),
        Assignment::UpdatedAt(v) => v.to_rfc3339(),
    }
}

/// Decode hashes fetched for `ids`; empty hashes are stale index entries
fn decode_rows(
    ids: &[String],
    rows: Vec<HashMap<String, String>>,
    item_key: impl Fn(&str) -> String,
) -> StoreResult<Vec<CoffeeItem>> {
    let mut items = Vec::with_capacity(rows.len());
    for (id, row) in ids.iter().zip(rows) {
        if row.is_empty() {
            warn!("Index references missing coffee {}", id);
            continue;
        }
        items.push(decode_item(&item_key(id), row)?);
    }
    Ok(items)
}

fn encode_item(item: &CoffeeItem) -> Vec<(&'static str, String)> {
    vec![
        ("id", item.id.clone()),
        (CoffeeField::Name.as_str(), item.name.clone()),
        (CoffeeField::Description.as_str(), item.description.clone()),
        (CoffeeField::Price.as_str(), item.price.to_string()),
        (CoffeeField::Category.as_str(), item.category.clone()),
        (CoffeeField::Available.as_str(), item.available.to_string()),
        ("createdAt", item.created_at.to_rfc3339()),
        (CoffeeField::UpdatedAt.as_str(), item.updated_at.to_rfc3339()),
    ]
}

fn decode_item(key: &str, mut row: HashMap<String, String>) -> StoreResult<CoffeeItem> {
    let mut take = |name: &str| {
        row.remove(name).ok_or_else(|| StoreError::Corrupt {
            key: key.to_string(),
            reason: format!("missing field {}", name),
        })
    };

    let id = take("id")?;
    let name = take(CoffeeField::Name.as_str())?;
    let description = take(CoffeeField::Description.as_str())?;
    let price = take(CoffeeField::Price.as_str())?;
    let category = take(CoffeeField::Category.as_str())?;
    let available = take(CoffeeField::Available.as_str())?;
    let created_at = take("createdAt")?;
    let updated_at = take(CoffeeField::UpdatedAt.as_str())?;

    Ok(CoffeeItem {
        id,
        name,
        description,
        price: parse(key, "price", &price)?,
        category,
        available: parse(key, "available", &available)?,
        created_at: parse(key, "createdAt", &created_at)?,
        updated_at: parse(key, "updatedAt", &updated_at)?,
    })
}

fn parse<T>(key: &str, name: &str, raw: &str) -> StoreResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse().map_err(|e| StoreError::Corrupt {
        key: key.to_string(),
        reason: format!("invalid {} {:?}: {}", name, raw, e),
    })
}
