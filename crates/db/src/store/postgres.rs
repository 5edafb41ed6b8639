use std::collections::BTreeMap;

use async_trait::async_trait;
use valuables_core::item::{Category, NewItem};
use valuables_core::types::DbId;

use super::{ItemStore, StoreError};
use crate::models::item::Item;
use crate::repositories::ItemRepo;
use crate::DbPool;

/// [`ItemStore`] backed by PostgreSQL through [`ItemRepo`].
#[derive(Clone)]
pub struct PgItemStore {
    pool: DbPool,
}

impl PgItemStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        Ok(ItemRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, StoreError> {
        Ok(ItemRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create(&self, input: &NewItem) -> Result<Item, StoreError> {
        Ok(ItemRepo::create(&self.pool, input).await?)
    }

    async fn update(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        Ok(ItemRepo::update(&self.pool, item).await?)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(ItemRepo::delete(&self.pool, id).await?)
    }

    async fn count_by_category(&self) -> Result<BTreeMap<Category, i64>, StoreError> {
        let rows = ItemRepo::count_by_category(&self.pool).await?;

        let mut counts = BTreeMap::new();
        for (label, count) in rows {
            let category = label
                .parse::<Category>()
                .map_err(|_| StoreError::InvalidData(format!("unknown category {label:?}")))?;
            counts.insert(category, count);
        }
        Ok(counts)
    }
}
