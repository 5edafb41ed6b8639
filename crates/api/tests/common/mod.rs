use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{NaiveDate, TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use valuables_api::config::ServerConfig;
use valuables_api::router::build_app_router;
use valuables_api::state::AppState;
use valuables_core::item::{Category, ItemLimits, NewItem};
use valuables_core::types::DbId;
use valuables_db::models::item::Item;
use valuables_db::store::{ItemStore, MemoryItemStore, StoreError};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout. No database is involved.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 1,
        item_limits: ItemLimits::default(),
    }
}

/// Build the full application router on top of `store`.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack.
pub fn build_test_app(store: Arc<dyn ItemStore>) -> Router {
    let config = test_config();
    let state = AppState {
        items: store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A stored item created on 2023-01-01 with the given mutable fields.
pub fn stored_item(id: DbId, name: &str, brand: &str, purchase_price: i64) -> Item {
    let created = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    Item {
        id,
        name: name.to_string(),
        category: Category::Watch,
        brand: brand.to_string(),
        purchase_price,
        purchase_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        created_at: created,
        updated_at: created,
    }
}

/// A memory store holding item 1: `{name: "A", brand: "B", purchase_price: 100}`.
pub fn seeded_store() -> Arc<RecordingStore> {
    Arc::new(RecordingStore::new(MemoryItemStore::with_items([
        stored_item(1, "A", "B", 100),
    ])))
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// Wraps a [`MemoryItemStore`] and counts reads and writes.
pub struct RecordingStore {
    inner: MemoryItemStore,
    finds: AtomicUsize,
    updates: AtomicUsize,
}

impl RecordingStore {
    pub fn new(inner: MemoryItemStore) -> Self {
        Self {
            inner,
            finds: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }

    pub fn find_calls(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub async fn stored(&self, id: DbId) -> Option<Item> {
        self.inner.find_by_id(id).await.unwrap()
    }
}

#[async_trait]
impl ItemStore for RecordingStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        self.inner.list().await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, StoreError> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn create(&self, input: &NewItem) -> Result<Item, StoreError> {
        self.inner.create(input).await
    }

    async fn update(&self, item: &Item) -> Result<Option<Item>, StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(item).await
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        self.inner.delete(id).await
    }

    async fn count_by_category(&self) -> Result<BTreeMap<Category, i64>, StoreError> {
        self.inner.count_by_category().await
    }
}

/// A store whose every call fails, for exercising 500 paths.
pub struct FailingStore;

fn unavailable() -> StoreError {
    StoreError::Unavailable("connection refused to 10.0.0.5:5432".to_string())
}

#[async_trait]
impl ItemStore for FailingStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: DbId) -> Result<Option<Item>, StoreError> {
        Err(unavailable())
    }

    async fn create(&self, _input: &NewItem) -> Result<Item, StoreError> {
        Err(unavailable())
    }

    async fn update(&self, _item: &Item) -> Result<Option<Item>, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: DbId) -> Result<bool, StoreError> {
        Err(unavailable())
    }

    async fn count_by_category(&self) -> Result<BTreeMap<Category, i64>, StoreError> {
        Err(unavailable())
    }
}

/// How [`ItemVanishingStore::update`] ends after a successful read.
#[derive(Debug, Clone, Copy)]
pub enum WriteOutcome {
    /// The row is gone by the time it is written back.
    RowMissing,
    /// The backend fails during the write.
    Error,
}

/// Reads through to a seeded memory store but never completes a write,
/// for exercising failures that only show up when persisting.
pub struct ItemVanishingStore {
    inner: MemoryItemStore,
    outcome: WriteOutcome,
}

impl ItemVanishingStore {
    /// Item 1 is readable; every update ends with `outcome`.
    pub fn new(outcome: WriteOutcome) -> Self {
        Self {
            inner: MemoryItemStore::with_items([stored_item(1, "A", "B", 100)]),
            outcome,
        }
    }
}

#[async_trait]
impl ItemStore for ItemVanishingStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        self.inner.list().await
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Item>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn create(&self, input: &NewItem) -> Result<Item, StoreError> {
        self.inner.create(input).await
    }

    async fn update(&self, _item: &Item) -> Result<Option<Item>, StoreError> {
        match self.outcome {
            WriteOutcome::RowMissing => Ok(None),
            WriteOutcome::Error => Err(unavailable()),
        }
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        self.inner.delete(id).await
    }

    async fn count_by_category(&self) -> Result<BTreeMap<Category, i64>, StoreError> {
        self.inner.count_by_category().await
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, method: Method, uri: &str, body: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(text) => {
            builder = builder.header("content-type", "application/json");
            Body::from(text.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(&body.to_string())).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(&body.to_string())).await
}

/// PATCH with a body sent verbatim, for malformed-input cases.
pub async fn patch_raw(app: Router, uri: &str, body: &str) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
