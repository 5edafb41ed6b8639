//! Handlers for the `/items` resource.
//!
//! Path identifiers and bodies are taken raw (`Path<String>`, `Bytes`) so
//! that malformed input maps onto this API's own error bodies instead of
//! the framework's default rejections.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use valuables_core::error::CoreError;
use valuables_core::item::{parse_item_id, Category, CreateItemRequest, ITEM_ENTITY};
use valuables_core::item_patch::{decode_item_patch, validate_changes};
use valuables_core::types::DbId;
use valuables_db::models::item::Item;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const LIST_FAILED: &str = "failed to retrieve items";
const GET_FAILED: &str = "failed to retrieve item";
const CREATE_FAILED: &str = "failed to create item";
const UPDATE_FAILED: &str = "failed to update item";
const DELETE_FAILED: &str = "failed to delete item";
const SUMMARY_FAILED: &str = "failed to retrieve summary";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: ITEM_ENTITY,
        id,
    })
}

/// Item counts per category, every category included.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub categories: BTreeMap<Category, i64>,
    pub total: i64,
}

/// GET /items
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let items = state.items.list().await.map_err(AppError::store(LIST_FAILED))?;
    Ok(Json(items))
}

/// GET /items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Item>> {
    let id = parse_item_id(&raw_id)?;
    let item = state
        .items
        .find_by_id(id)
        .await
        .map_err(AppError::store(GET_FAILED))?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// POST /items
pub async fn create(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<Item>)> {
    let request: CreateItemRequest = serde_json::from_slice(&body)
        .map_err(|e| CoreError::InvalidFormat(e.to_string()))?;
    let input = request.validate(&state.config.item_limits)?;

    let item = state
        .items
        .create(&input)
        .await
        .map_err(AppError::store(CREATE_FAILED))?;

    tracing::info!(item_id = item.id, category = %item.category, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PATCH /items/{id}
///
/// Stages run strictly in order and any failure ends the request:
/// identifier, decode, immutable-field guard, fetch, merge, validate,
/// persist. Nothing is written unless every earlier stage passed.
pub async fn patch(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> AppResult<Json<Item>> {
    let id = parse_item_id(&raw_id)?;
    let changes = decode_item_patch(&body)?;

    let mut item = state
        .items
        .find_by_id(id)
        .await
        .map_err(AppError::store(UPDATE_FAILED))?
        .ok_or_else(|| not_found(id))?;

    item.apply_changes(&changes, Utc::now());
    validate_changes(&changes, &state.config.item_limits)?;

    let updated = state
        .items
        .update(&item)
        .await
        .map_err(AppError::store(UPDATE_FAILED))?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(
        item_id = id,
        fields = ?changes.present_fields(),
        "Item patched",
    );
    Ok(Json(updated))
}

/// DELETE /items/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_item_id(&raw_id)?;
    let deleted = state
        .items
        .delete(id)
        .await
        .map_err(AppError::store(DELETE_FAILED))?;

    if deleted {
        tracing::info!(item_id = id, "Item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// GET /items/summary
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<CategorySummary>> {
    let counts = state
        .items
        .count_by_category()
        .await
        .map_err(AppError::store(SUMMARY_FAILED))?;

    let categories: BTreeMap<Category, i64> = Category::ALL
        .into_iter()
        .map(|c| (c, counts.get(&c).copied().unwrap_or(0)))
        .collect();
    let total = categories.values().sum();

    Ok(Json(CategorySummary { categories, total }))
}
