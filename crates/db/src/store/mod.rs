//! Storage abstraction used by the HTTP handlers.
//!
//! [`ItemStore`] is the only persistence seam the API depends on. Each call
//! is atomic on its own; callers get no cross-call transaction, so two
//! concurrent updates of the same item resolve as last-write-wins.

use std::collections::BTreeMap;

use async_trait::async_trait;
use valuables_core::item::{Category, NewItem};
use valuables_core::types::DbId;

use crate::models::item::Item;

mod memory;
mod postgres;

pub use memory::MemoryItemStore;
pub use postgres::PgItemStore;

/// Failure inside a storage backend. Never shown to API clients.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back into the domain model.
    #[error("Invalid stored data: {0}")]
    InvalidData(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Check the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    /// `Ok(None)` when no item has this ID.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, StoreError>;

    async fn create(&self, input: &NewItem) -> Result<Item, StoreError>;

    /// Persist a merged item. `Ok(None)` when the item no longer exists.
    async fn update(&self, item: &Item) -> Result<Option<Item>, StoreError>;

    /// `Ok(false)` when no item has this ID.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Number of items per category. Categories without items may be
    /// missing from the map.
    async fn count_by_category(&self) -> Result<BTreeMap<Category, i64>, StoreError>;
}
