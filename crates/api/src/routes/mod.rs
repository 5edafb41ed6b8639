pub mod health;
pub mod items;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /items                                           list, create
/// /items/summary                                   counts per category
/// /items/{id}                                      get, partial update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/items", items::router())
}
