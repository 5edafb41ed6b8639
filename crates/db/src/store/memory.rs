use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use valuables_core::item::{Category, NewItem};
use valuables_core::types::DbId;

use super::{ItemStore, StoreError};
use crate::models::item::Item;

#[derive(Debug, Default)]
struct Inner {
    last_id: DbId,
    items: BTreeMap<DbId, Item>,
}

/// [`ItemStore`] kept in process memory. IDs are assigned sequentially
/// from 1, like a BIGSERIAL column.
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    inner: RwLock<Inner>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `items`, keeping their IDs.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut inner = Inner::default();
        for item in items {
            inner.last_id = inner.last_id.max(item.id);
            inner.items.insert(item.id, item);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryItemStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.items.get(&id).cloned())
    }

    async fn create(&self, input: &NewItem) -> Result<Item, StoreError> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;

        let now = Utc::now();
        let item = Item {
            id: inner.last_id,
            name: input.name.clone(),
            category: input.category,
            brand: input.brand.clone(),
            purchase_price: input.purchase_price,
            purchase_date: input.purchase_date,
            created_at: now,
            updated_at: now,
        };
        inner.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        let mut inner = self.inner.write().await;
        let Some(stored) = inner.items.get_mut(&item.id) else {
            return Ok(None);
        };

        // Same column set as the SQL update.
        stored.name = item.name.clone();
        stored.brand = item.brand.clone();
        stored.purchase_price = item.purchase_price;
        stored.updated_at = item.updated_at;
        Ok(Some(stored.clone()))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.items.remove(&id).is_some())
    }

    async fn count_by_category(&self) -> Result<BTreeMap<Category, i64>, StoreError> {
        let inner = self.inner.read().await;
        let mut counts = BTreeMap::new();
        for item in inner.items.values() {
            *counts.entry(item.category).or_insert(0) += 1;
        }
        Ok(counts)
    }
}
